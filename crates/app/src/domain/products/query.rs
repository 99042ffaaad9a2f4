//! Product list query parsing and validation.
//!
//! Turns the raw `page`, `limit`, `name`, `min_price`, `max_price`, `sort_by`,
//! `sort_order` and `fields` query parameters into a defaulted, validated
//! [`ProductQuery`]. Nothing here touches the store.

use std::{num::IntErrorKind, str::FromStr};

use rust_decimal::Decimal;
use serde::Deserialize;
use smallvec::SmallVec;
use thiserror::Error;

/// Highest page number a client may request.
pub const MAX_PAGE: u32 = 1000;

/// Page size used when `limit` is absent.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest accepted page size.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Requested output fields, in request order without duplicates.
pub type ProductFields = SmallVec<[ProductField; 6]>;

/// Raw list parameters exactly as they arrive on the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListProductsParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub name: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub fields: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("page cannot exceed 1000")]
    PageTooLarge,

    #[error("limit must be an integer between 1 and 100")]
    InvalidLimit,

    #[error("sort_by must be one of: name, price, created_at, updated_at")]
    InvalidSortField,

    #[error("sort_order must be one of: asc, desc")]
    InvalidSortOrder,

    #[error("min_price must be a non-negative number")]
    InvalidMinPrice,

    #[error("max_price must be a non-negative number")]
    InvalidMaxPrice,

    #[error("min_price cannot be greater than max_price")]
    PriceRangeInverted,

    #[error("unknown field in fields: {0}")]
    UnknownField(String),
}

/// Column a product list can be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    Name,
    Price,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Price => "price",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

impl FromStr for SortField {
    type Err = QueryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "name" => Ok(Self::Name),
            "price" => Ok(Self::Price),
            "created_at" => Ok(Self::CreatedAt),
            "updated_at" => Ok(Self::UpdatedAt),
            _ => Err(QueryError::InvalidSortField),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = QueryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "asc" => Ok(Self::Ascending),
            "desc" => Ok(Self::Descending),
            _ => Err(QueryError::InvalidSortOrder),
        }
    }
}

/// A field that can be selected with the `fields` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Id,
    Name,
    Description,
    Price,
    CreatedAt,
    UpdatedAt,
}

impl FromStr for ProductField {
    type Err = QueryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            "description" => Ok(Self::Description),
            "price" => Ok(Self::Price),
            "created_at" => Ok(Self::CreatedAt),
            "updated_at" => Ok(Self::UpdatedAt),
            other => Err(QueryError::UnknownField(other.to_string())),
        }
    }
}

/// Validated, defaulted parameters for one list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    /// 1-based page number.
    pub page: u32,

    /// Items per page.
    pub page_size: u32,

    /// Case-sensitive substring the name must contain.
    pub name: Option<String>,

    /// Inclusive lower price bound. A bound of zero is stored as `None`.
    pub min_price: Option<Decimal>,

    /// Inclusive upper price bound. A bound of zero is stored as `None`.
    pub max_price: Option<Decimal>,

    pub sort_field: SortField,

    pub sort_direction: SortDirection,

    /// Projection; empty selects every field.
    pub fields: ProductFields,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            name: None,
            min_price: None,
            max_price: None,
            sort_field: SortField::default(),
            sort_direction: SortDirection::default(),
            fields: ProductFields::new(),
        }
    }
}

impl ProductQuery {
    /// Number of sorted items preceding the requested page.
    #[must_use]
    pub fn offset(&self) -> usize {
        let skipped = u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size);

        usize::try_from(skipped).unwrap_or(usize::MAX)
    }

    /// Whether any name or price filter narrows the result set.
    #[must_use]
    pub fn has_filters(&self) -> bool {
        self.name.is_some() || self.min_price.is_some() || self.max_price.is_some()
    }

    /// Whether `field` should be present in the response.
    #[must_use]
    pub fn selects(&self, field: ProductField) -> bool {
        self.fields.is_empty() || self.fields.contains(&field)
    }
}

impl TryFrom<ListProductsParams> for ProductQuery {
    type Error = QueryError;

    fn try_from(params: ListProductsParams) -> Result<Self, Self::Error> {
        let page = parse_page(params.page.as_deref())?;
        let page_size = parse_page_size(present(params.limit.as_deref()))?;

        let sort_field = present(params.sort_by.as_deref())
            .map(SortField::from_str)
            .transpose()?
            .unwrap_or_default();

        let sort_direction = present(params.sort_order.as_deref())
            .map(SortDirection::from_str)
            .transpose()?
            .unwrap_or_default();

        let min_price = parse_price(params.min_price.as_deref(), QueryError::InvalidMinPrice)?;
        let max_price = parse_price(params.max_price.as_deref(), QueryError::InvalidMaxPrice)?;

        if let (Some(min), Some(max)) = (min_price, max_price)
            && min > max
        {
            return Err(QueryError::PriceRangeInverted);
        }

        let fields = parse_fields(params.fields.as_deref())?;

        Ok(Self {
            page,
            page_size,
            name: params.name.filter(|name| !name.is_empty()),
            min_price,
            max_price,
            sort_field,
            sort_direction,
            fields,
        })
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_page(value: Option<&str>) -> Result<u32, QueryError> {
    let page = match present(value).map(str::parse::<i64>) {
        Some(Ok(page)) if page > 0 => page,
        Some(Err(error)) if *error.kind() == IntErrorKind::PosOverflow => {
            return Err(QueryError::PageTooLarge);
        }
        _ => 1,
    };

    u32::try_from(page)
        .ok()
        .filter(|page| *page <= MAX_PAGE)
        .ok_or(QueryError::PageTooLarge)
}

fn parse_page_size(value: Option<&str>) -> Result<u32, QueryError> {
    let Some(value) = value else {
        return Ok(DEFAULT_PAGE_SIZE);
    };

    value
        .parse::<u32>()
        .ok()
        .filter(|size| (1..=MAX_PAGE_SIZE).contains(size))
        .ok_or(QueryError::InvalidLimit)
}

fn parse_price(value: Option<&str>, invalid: QueryError) -> Result<Option<Decimal>, QueryError> {
    let Some(value) = present(value) else {
        return Ok(None);
    };

    match Decimal::from_str(value) {
        Ok(price) if price.is_zero() => Ok(None),
        Ok(price) if !price.is_sign_negative() => Ok(Some(price)),
        _ => Err(invalid),
    }
}

fn parse_fields(value: Option<&str>) -> Result<ProductFields, QueryError> {
    let mut fields = ProductFields::new();

    for name in value.unwrap_or_default().split(',').map(str::trim) {
        if name.is_empty() {
            continue;
        }

        let field = ProductField::from_str(name)?;

        if !fields.contains(&field) {
            fields.push(field);
        }
    }

    Ok(fields)
}

/// Pagination metadata derived from a query and the total match count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: u32,
    pub per_page: u32,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    #[must_use]
    pub fn new(query: &ProductQuery, total_items: u64) -> Self {
        let per_page = u64::from(query.page_size.max(1));

        Self {
            current_page: query.page,
            per_page: query.page_size,
            total_pages: total_items.div_ceil(per_page),
            total_items,
            has_next: u64::from(query.page) * per_page < total_items,
            has_prev: query.page > 1,
        }
    }
}

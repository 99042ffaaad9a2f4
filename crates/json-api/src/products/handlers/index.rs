//! Product Index Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use catalog_app::domain::products::{
    ProductPage,
    query::{ListProductsParams, Pagination, ProductQuery},
};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaginationResponse {
    pub current_page: u32,
    pub per_page: u32,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl From<Pagination> for PaginationResponse {
    fn from(pagination: Pagination) -> Self {
        Self {
            current_page: pagination.current_page,
            per_page: pagination.per_page,
            total_pages: pagination.total_pages,
            total_items: pagination.total_items,
            has_next: pagination.has_next,
            has_prev: pagination.has_prev,
        }
    }
}

/// Echo of the filters that narrowed the result set.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct FiltersApplied {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    #[salvo(schema(value_type = Option<f64>))]
    pub min_price: Option<Decimal>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    #[salvo(schema(value_type = Option<f64>))]
    pub max_price: Option<Decimal>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The requested page of products
    pub products: Vec<ProductResponse>,

    pub pagination: PaginationResponse,

    /// Present only when a name or price filter was given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters_applied: Option<FiltersApplied>,
}

impl ProductsResponse {
    fn new(query: &ProductQuery, page: ProductPage) -> Self {
        let filters_applied = query.has_filters().then(|| FiltersApplied {
            name: query.name.clone(),
            min_price: query.min_price,
            max_price: query.max_price,
        });

        Self {
            products: page
                .items
                .into_iter()
                .map(|product| ProductResponse::project(product, query))
                .collect(),
            pagination: Pagination::new(query, page.total_items).into(),
            filters_applied,
        }
    }
}

/// Product Index Handler
///
/// Returns one page of products, optionally filtered by a name substring and
/// an inclusive price range, sorted by `sort_by`/`sort_order`.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "One page of products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid query parameter"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
        (status_code = StatusCode::GATEWAY_TIMEOUT, description = "Product store timed out"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let params = req
        .parse_queries::<ListProductsParams>()
        .or_400("could not read list query parameters")?;

    let query = ProductQuery::try_from(params).or_400("rejected list query")?;

    let page = state
        .app
        .products
        .list_products(query.clone())
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse::new(&query, page)))
}

//! Store-level filter expression.

use rust_decimal::Decimal;

use crate::domain::products::{models::Product, query::ProductQuery};

/// Predicate pushed down to the record store: a case-sensitive substring
/// match on the name AND an inclusive price range. Absent parts match
/// everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreFilter {
    pub name_contains: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl StoreFilter {
    /// Whether the filter matches every record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name_contains.is_none() && self.min_price.is_none() && self.max_price.is_none()
    }

    /// Evaluate the filter against a single record.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.name_contains
            .as_deref()
            .is_none_or(|needle| product.name.contains(needle))
            && self.min_price.is_none_or(|min| product.price >= min)
            && self.max_price.is_none_or(|max| product.price <= max)
    }
}

impl From<&ProductQuery> for StoreFilter {
    fn from(query: &ProductQuery) -> Self {
        Self {
            name_contains: query.name.clone(),
            min_price: query.min_price,
            max_price: query.max_price,
        }
    }
}

//! Products service errors.

use thiserror::Error;

use crate::domain::products::{models::ProductError, store::StoreError};

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product not found")]
    NotFound,

    #[error(transparent)]
    InvalidProduct(#[from] ProductError),

    #[error("store operation timed out")]
    Timeout,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_product_displays_the_violated_rule() {
        let error = ProductsServiceError::from(ProductError::EmptyName);

        assert_eq!(error.to_string(), "name is required");
    }

    #[test]
    fn store_errors_do_not_leak_driver_details() {
        let error = ProductsServiceError::from(StoreError::Sql(sqlx::Error::PoolTimedOut));

        assert_eq!(error.to_string(), "storage error");
    }
}

//! Product record store capability.

use std::num::TryFromIntError;

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::domain::products::{
    filter::StoreFilter,
    models::{Product, ProductUuid},
};

mod memory;
mod postgres;

pub use memory::InMemoryProductStore;
pub use postgres::PgProductStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error")]
    Sql(#[from] sqlx::Error),

    #[error("scan limit out of range")]
    LimitOutOfRange(#[from] TryFromIntError),
}

/// Key-value persistence for products, keyed by id.
///
/// Scans come back in no particular order; callers sort what they need.
#[automock]
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert or fully overwrite a product.
    async fn put(&self, product: &Product) -> Result<(), StoreError>;

    /// Fetch a product by id.
    async fn get(&self, product: ProductUuid) -> Result<Option<Product>, StoreError>;

    /// Delete a product by id, returning whether it existed.
    async fn delete(&self, product: ProductUuid) -> Result<bool, StoreError>;

    /// Return the products matching `filter`, at most `limit` of them.
    async fn scan(
        &self,
        filter: &StoreFilter,
        limit: Option<usize>,
    ) -> Result<Vec<Product>, StoreError>;

    /// Count the products matching `filter`.
    async fn count(&self, filter: &StoreFilter) -> Result<u64, StoreError>;
}

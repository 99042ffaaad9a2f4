//! In-memory product store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::products::{
    filter::StoreFilter,
    models::{Product, ProductUuid},
    store::{ProductStore, StoreError},
};

/// Process-local store. Scans walk the records in id order, which keeps
/// results deterministic for tests and local runs.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    products: RwLock<BTreeMap<ProductUuid, Product>>,
}

impl InMemoryProductStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn put(&self, product: &Product) -> Result<(), StoreError> {
        self.products
            .write()
            .await
            .insert(product.uuid, product.clone());

        Ok(())
    }

    async fn get(&self, product: ProductUuid) -> Result<Option<Product>, StoreError> {
        Ok(self.products.read().await.get(&product).cloned())
    }

    async fn delete(&self, product: ProductUuid) -> Result<bool, StoreError> {
        Ok(self.products.write().await.remove(&product).is_some())
    }

    async fn scan(
        &self,
        filter: &StoreFilter,
        limit: Option<usize>,
    ) -> Result<Vec<Product>, StoreError> {
        Ok(self
            .products
            .read()
            .await
            .values()
            .filter(|product| filter.matches(product))
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &StoreFilter) -> Result<u64, StoreError> {
        let products = self.products.read().await;
        let matching = products
            .values()
            .filter(|product| filter.matches(product))
            .count();

        Ok(u64::try_from(matching)?)
    }
}

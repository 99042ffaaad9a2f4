//! App Context

use std::{fmt, sync::Arc, time::Duration};

use thiserror::Error;

use crate::{
    database,
    domain::products::{
        ProductsService, StoreProductsService,
        store::{InMemoryProductStore, PgProductStore, ProductStore},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),

    #[error("a database URL is required for the postgres store")]
    MissingDatabaseUrl,
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context around an already constructed store.
    #[must_use]
    pub fn new(store: Arc<dyn ProductStore>, store_timeout: Duration) -> Self {
        Self {
            products: Arc::new(StoreProductsService::new(store, store_timeout)),
        }
    }

    /// Build application context from a database URL, applying migrations.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or running
    /// migrations fails.
    pub async fn from_database_url(
        url: &str,
        store_timeout: Duration,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        Ok(Self::new(Arc::new(PgProductStore::new(pool)), store_timeout))
    }

    /// Build application context over a process-local store.
    #[must_use]
    pub fn in_memory(store_timeout: Duration) -> Self {
        Self::new(Arc::new(InMemoryProductStore::new()), store_timeout)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::domain::products::{ProductsServiceError, models::NewProduct};

    use super::*;

    #[tokio::test]
    async fn in_memory_context_shares_one_store_across_calls() -> TestResult {
        let ctx = AppContext::in_memory(Duration::from_secs(1));

        let created = ctx
            .products
            .create_product(NewProduct {
                name: "Laptop".to_string(),
                description: String::new(),
                price: Decimal::TEN,
            })
            .await?;

        let cloned = ctx.clone();

        assert_eq!(cloned.products.get_product(created.uuid).await?, created);

        cloned.products.delete_product(created.uuid).await?;

        assert!(matches!(
            ctx.products.get_product(created.uuid).await,
            Err(ProductsServiceError::NotFound)
        ));

        Ok(())
    }

    #[test]
    fn debug_output_names_the_context() {
        let ctx = AppContext::in_memory(Duration::from_secs(1));

        assert_eq!(format!("{ctx:?}"), "AppContext { .. }");
    }
}

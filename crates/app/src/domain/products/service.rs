//! Products service.

use std::{error::Error as StdError, fmt, future::Future, sync::Arc, time::Duration};

use async_trait::async_trait;
use mockall::automock;
use tracing::{error, warn};

use crate::domain::products::{
    errors::ProductsServiceError,
    filter::StoreFilter,
    listing::{self, ProductPage},
    models::{NewProduct, Product, ProductUpdate, ProductUuid},
    query::ProductQuery,
    store::{ProductStore, StoreError},
};

/// Default deadline for the store work behind a single service call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// What a store call acts on, carried into failure logs for correlation.
#[derive(Debug, Clone, Copy)]
enum Target<'a> {
    Product(ProductUuid),
    Listing(&'a StoreFilter),
}

#[derive(Clone)]
pub struct StoreProductsService {
    store: Arc<dyn ProductStore>,
    timeout: Duration,
}

impl fmt::Debug for StoreProductsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreProductsService")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl StoreProductsService {
    #[must_use]
    pub fn new(store: Arc<dyn ProductStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Run `work` under the store deadline, logging failures with the
    /// operation, its target and the full error chain.
    async fn run<T>(
        &self,
        operation: &'static str,
        target: Target<'_>,
        work: impl Future<Output = Result<T, StoreError>> + Send,
    ) -> Result<T, ProductsServiceError> {
        let failure = match tokio::time::timeout(self.timeout, work).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(source)) => ProductsServiceError::Store(source),
            Err(_) => ProductsServiceError::Timeout,
        };

        let cause = error_chain(&failure);
        let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);

        match target {
            Target::Product(product) => error!(
                operation,
                product = %product,
                timeout_ms,
                error = %cause,
                "product store operation failed"
            ),
            Target::Listing(filter) => error!(
                operation,
                name = filter.name_contains.as_deref(),
                min_price = filter.min_price.map(tracing::field::display),
                max_price = filter.max_price.map(tracing::field::display),
                timeout_ms,
                error = %cause,
                "product store operation failed"
            ),
        }

        Err(failure)
    }
}

/// Render `error` followed by each of its sources, separated by `": "`.
fn error_chain(error: &dyn StdError) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }

    rendered
}

#[async_trait]
impl ProductsService for StoreProductsService {
    async fn list_products(&self, query: ProductQuery) -> Result<ProductPage, ProductsServiceError> {
        let filter = StoreFilter::from(&query);

        self.run(
            "list",
            Target::Listing(&filter),
            listing::list_products(self.store.as_ref(), &query),
        )
        .await
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError> {
        self.run("get", Target::Product(product), self.store.get(product))
            .await?
            .ok_or(ProductsServiceError::NotFound)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        let product = Product::new(product).inspect_err(|error| {
            warn!(%error, "rejected invalid product");
        })?;

        self.run("put", Target::Product(product.uuid), self.store.put(&product))
            .await?;

        Ok(product)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        let mut existing = self
            .run("get", Target::Product(product), self.store.get(product))
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        existing.apply(update).inspect_err(|error| {
            warn!(product = %product, %error, "rejected invalid product update");
        })?;

        self.run("put", Target::Product(product), self.store.put(&existing))
            .await?;

        Ok(existing)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        if self
            .run("delete", Target::Product(product), self.store.delete(product))
            .await?
        {
            Ok(())
        } else {
            Err(ProductsServiceError::NotFound)
        }
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieve one page of products matching the query.
    async fn list_products(&self, query: ProductQuery) -> Result<ProductPage, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError>;

    /// Validate and store a new product.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Overwrite the mutable fields of an existing product.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Deletes a product with the given UUID.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}

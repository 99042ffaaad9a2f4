//! PostgreSQL product store.

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Row, postgres::PgRow, query, query_as};

use crate::domain::products::{
    filter::StoreFilter,
    models::{Product, ProductUuid},
    store::{ProductStore, StoreError},
};

const PUT_PRODUCT_SQL: &str = include_str!("sql/put_product.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const SCAN_PRODUCTS_SQL: &str = include_str!("sql/scan_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");

/// One row per product in the `products` table, keyed by `uuid`.
///
/// Filters are evaluated by the database; ordering is left to the caller.
#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &StoreFilter) {
    if let Some(name) = &filter.name_contains {
        builder
            .push(" AND strpos(name, ")
            .push_bind(name.clone())
            .push(") > 0");
    }

    if let Some(min) = filter.min_price {
        builder.push(" AND price >= ").push_bind(min);
    }

    if let Some(max) = filter.max_price {
        builder.push(" AND price <= ").push_bind(max);
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn put(&self, product: &Product) -> Result<(), StoreError> {
        query(PUT_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .bind(SqlxTimestamp::from(product.created_at))
            .bind(SqlxTimestamp::from(product.updated_at))
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get(&self, product: ProductUuid) -> Result<Option<Product>, StoreError> {
        Ok(query_as::<Postgres, Product>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete(&self, product: ProductUuid) -> Result<bool, StoreError> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    async fn scan(
        &self,
        filter: &StoreFilter,
        limit: Option<usize>,
    ) -> Result<Vec<Product>, StoreError> {
        let mut builder = QueryBuilder::<Postgres>::new(SCAN_PRODUCTS_SQL);

        push_filter(&mut builder, filter);

        if let Some(limit) = limit {
            builder.push(" LIMIT ").push_bind(i64::try_from(limit)?);
        }

        Ok(builder
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?)
    }

    async fn count(&self, filter: &StoreFilter) -> Result<u64, StoreError> {
        let mut builder = QueryBuilder::<Postgres>::new(COUNT_PRODUCTS_SQL);

        push_filter(&mut builder, filter);

        let count: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(count)?)
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let price: Decimal = row.try_get("price")?;

        if price.is_sign_negative() && !price.is_zero() {
            return Err(sqlx::Error::ColumnDecode {
                index: "price".to_string(),
                source: "negative price".into(),
            });
        }

        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

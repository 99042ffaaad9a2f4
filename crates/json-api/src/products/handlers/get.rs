//! Get Product Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use catalog_app::domain::products::{
    models::Product,
    query::{ProductField, ProductQuery},
};

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Product representation. Every key is present unless the list request
/// asked for a subset with `fields`.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Unit price
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    #[salvo(schema(value_type = Option<f64>))]
    pub price: Option<Decimal>,

    /// The date and time the product was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// The date and time the product was last updated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl ProductResponse {
    /// Keep only the fields `query` selects.
    pub(crate) fn project(product: Product, query: &ProductQuery) -> Self {
        let selected = |field| query.selects(field);

        Self {
            id: selected(ProductField::Id).then(|| product.uuid.into_uuid()),
            name: selected(ProductField::Name).then_some(product.name),
            description: selected(ProductField::Description).then_some(product.description),
            price: selected(ProductField::Price).then_some(product.price),
            created_at: selected(ProductField::CreatedAt).then(|| product.created_at.to_string()),
            updated_at: selected(ProductField::UpdatedAt).then(|| product.updated_at.to_string()),
        }
    }
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self::project(product, &ProductQuery::default())
    }
}

/// Get Product Handler
///
/// Returns a product.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product found"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed product id"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_product(id.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}

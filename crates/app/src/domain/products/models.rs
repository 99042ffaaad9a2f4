//! Product Models

use jiff::Timestamp;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Domain invariant violations raised before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductError {
    #[error("name is required")]
    EmptyName,

    #[error("price cannot be negative")]
    NegativePrice,
}

/// Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
}

/// Product Update Model
///
/// Updates overwrite every mutable field.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub description: String,
    pub price: Decimal,
}

impl Product {
    /// Build a product with a fresh id, stamping both timestamps with the
    /// same instant.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError`] when the name is empty or the price negative.
    pub fn new(product: NewProduct) -> Result<Self, ProductError> {
        Self::new_at(product, Timestamp::now())
    }

    pub(crate) fn new_at(product: NewProduct, now: Timestamp) -> Result<Self, ProductError> {
        validate(&product.name, product.price)?;

        Ok(Self {
            uuid: ProductUuid::new(),
            name: product.name,
            description: product.description,
            price: product.price,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace all mutable fields and bump `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError`] when the update breaks an invariant; the
    /// product is left untouched in that case.
    pub fn apply(&mut self, update: ProductUpdate) -> Result<(), ProductError> {
        self.apply_at(update, Timestamp::now())
    }

    pub(crate) fn apply_at(
        &mut self,
        update: ProductUpdate,
        now: Timestamp,
    ) -> Result<(), ProductError> {
        validate(&update.name, update.price)?;

        self.name = update.name;
        self.description = update.description;
        self.price = update.price;
        self.updated_at = now.max(self.created_at);

        Ok(())
    }
}

fn validate(name: &str, price: Decimal) -> Result<(), ProductError> {
    if name.is_empty() {
        return Err(ProductError::EmptyName);
    }

    if price.is_sign_negative() && !price.is_zero() {
        return Err(ProductError::NegativePrice);
    }

    Ok(())
}

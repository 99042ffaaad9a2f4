//! Products

pub mod errors;
pub mod filter;
pub mod listing;
pub mod models;
pub mod query;
pub mod service;
pub mod store;

pub use errors::ProductsServiceError;
pub use listing::ProductPage;
pub use models::ProductError;
pub use service::*;

//! Product Errors

use salvo::http::StatusError;

use catalog_app::domain::products::ProductsServiceError;

/// Map a service failure onto its HTTP status.
///
/// Store failures were already logged with context by the service, so the
/// response carries no detail for them.
pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::InvalidProduct(reason) => {
            StatusError::bad_request().brief(reason.to_string())
        }
        ProductsServiceError::Timeout => {
            StatusError::gateway_timeout().brief("The product store did not respond in time")
        }
        ProductsServiceError::Store(_) => StatusError::internal_server_error(),
    }
}

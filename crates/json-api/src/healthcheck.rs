//! Catalog JSON API Healthcheck Handler

use jiff::Timestamp;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status, always `UP` while the process serves requests
    pub status: String,

    /// Time the check was answered (RFC 3339)
    pub timestamp: String,
}

/// Healthcheck handler
///
/// Reports liveness only; the product store is not consulted.
#[endpoint(tags("health"), summary = "Health check endpoint")]
pub(crate) async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP".to_string(),
        timestamp: Timestamp::now().to_string(),
    })
}

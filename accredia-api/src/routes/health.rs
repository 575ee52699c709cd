/// Health check endpoint

use axum::Json;
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service status
    pub status: String,

    /// Service version
    pub version: String,
}

/// GET /health
///
/// Returns service liveness and version. Requires no authentication so load
/// balancers and orchestrators can probe it.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: accredia_shared::VERSION.to_string(),
    })
}

//! Health check handler.

use axum::Json;
use axum::extract::State;

use userhub_core::error::AppError;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /health
pub async fn health(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<HealthResponse>>, ApiError> {
    let healthy = state.accounts.health_check().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Health check failed");
        false
    });
    if !healthy {
        return Err(AppError::service_unavailable("Account store unavailable").into());
    }
    Ok(Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })))
}

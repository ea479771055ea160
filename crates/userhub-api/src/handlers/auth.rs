//! Auth handlers: register and login.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::LoginRequest;
use crate::dto::response::{AccountResponse, ApiResponse, LoginResponse};
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::ingest::AccountForm;
use crate::state::AppState;

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    AccountForm(submission): AccountForm,
) -> Result<(StatusCode, Json<ApiResponse<AccountResponse>>), ApiError> {
    let account = state.accounts.register(submission).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(AccountResponse::from(account))),
    ))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let result = state.accounts.login(&req.username, &req.password).await?;
    Ok(Json(ApiResponse::ok(LoginResponse::from(result))))
}

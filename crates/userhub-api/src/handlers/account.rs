//! Account management handlers.

use axum::Json;
use axum::extract::{Path, State};

use crate::dto::response::{AccountResponse, ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{Caller, parse_account_id};
use crate::ingest::AccountForm;
use crate::state::AppState;

/// GET /users
pub async fn list_accounts(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<AccountResponse>>>, ApiError> {
    let accounts = state.accounts.list().await?;
    Ok(Json(ApiResponse::ok(
        accounts.into_iter().map(AccountResponse::from).collect(),
    )))
}

/// GET /users/{id}
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    let id = parse_account_id(&id)?;
    let account = state.accounts.get(id).await?;
    Ok(Json(ApiResponse::ok(AccountResponse::from(account))))
}

/// PUT /update/{id}
pub async fn update_account(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
    AccountForm(submission): AccountForm,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    let id = parse_account_id(&id)?;
    let account = state
        .accounts
        .update(caller.identity(), id, submission)
        .await?;
    Ok(Json(ApiResponse::ok(AccountResponse::from(account))))
}

/// DELETE /delete/{id}
pub async fn delete_account(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = parse_account_id(&id)?;
    state.accounts.delete(caller.identity(), id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: format!("Account {id} deleted"),
    })))
}

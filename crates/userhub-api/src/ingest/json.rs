//! JSON account payloads.

use axum::extract::{FromRequest, Request};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;

use userhub_core::error::AppError;

use super::RawFields;
use crate::dto::request::AccountPayload;

/// Reads a JSON object body. `image` is decoded from standard base64.
pub(crate) async fn read<S>(req: Request, state: &S) -> Result<RawFields, AppError>
where
    S: Send + Sync,
{
    let body = Bytes::from_request(req, state)
        .await
        .map_err(|e| AppError::validation(format!("Failed to read request body: {}", e.body_text())))?;

    let payload: AccountPayload = serde_json::from_slice(&body)
        .map_err(|e| AppError::validation(format!("Invalid JSON body: {e}")))?;

    let image = match payload.image.as_deref() {
        Some(encoded) if !encoded.is_empty() => Some(Bytes::from(
            STANDARD
                .decode(encoded)
                .map_err(|e| AppError::validation(format!("Invalid base64 image: {e}")))?,
        )),
        _ => None,
    };

    Ok(RawFields {
        username: payload.username,
        password: payload.password,
        role: payload.role,
        region: payload.region,
        image,
        clear_region: payload.clear_region,
        clear_image: payload.clear_image,
    })
}

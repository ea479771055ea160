//! Dual-shape account ingestion.
//!
//! [`AccountForm`] accepts either `multipart/form-data` or a JSON object
//! and yields one canonical [`AccountSubmission`]. Presence rules are the
//! same for both shapes: a field counts only if present and non-empty, and
//! `clear_region` / `clear_image` request removal. Every decoding failure,
//! including an oversized body, is a validation error raised before any
//! persistence.

pub mod json;
pub mod multipart;

use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use bytes::Bytes;

use userhub_core::error::AppError;
use userhub_core::types::Patch;
use userhub_service::account::AccountSubmission;

use crate::error::ApiError;

/// Extracted account submission.
#[derive(Debug, Clone)]
pub struct AccountForm(pub AccountSubmission);

impl<S> FromRequest<S> for AccountForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim_start().to_ascii_lowercase().starts_with("multipart/form-data"))
            .unwrap_or(false);

        let raw = if is_multipart {
            multipart::read(req, state).await?
        } else {
            json::read(req, state).await?
        };

        Ok(Self(raw.into_submission()?))
    }
}

/// Fields as read off the wire, before presence rules are applied.
#[derive(Debug, Default)]
pub(crate) struct RawFields {
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub region: Option<String>,
    pub image: Option<Bytes>,
    pub clear_region: bool,
    pub clear_image: bool,
}

impl RawFields {
    pub(crate) fn into_submission(self) -> Result<AccountSubmission, AppError> {
        let region = Patch::from_text(self.region);
        let image = Patch::from_option(self.image.filter(|b| !b.is_empty()));

        Ok(AccountSubmission {
            username: Patch::from_text(self.username),
            password: Patch::from_text(self.password),
            role: Patch::from_text(self.role),
            region: with_clear(region, self.clear_region, "region")?,
            image: with_clear(image, self.clear_image, "image")?,
        })
    }
}

fn with_clear<T>(value: Patch<T>, clear: bool, field: &str) -> Result<Patch<T>, AppError> {
    match (clear, value) {
        (false, value) => Ok(value),
        (true, Patch::Unchanged) => Ok(Patch::Clear),
        (true, _) => Err(AppError::validation(format!(
            "{field} cannot be both provided and cleared"
        ))),
    }
}

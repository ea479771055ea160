//! `multipart/form-data` account payloads.

use std::collections::HashSet;

use axum::extract::multipart::Field;
use axum::extract::{FromRequest, Multipart, Request};

use userhub_core::error::AppError;

use super::RawFields;

/// Reads text fields and the optional `image` file part. Unknown fields are
/// ignored. A field sent twice, counting `zona` as `region`, is rejected
/// the same way a duplicate JSON key is.
pub(crate) async fn read<S>(req: Request, state: &S) -> Result<RawFields, AppError>
where
    S: Send + Sync,
{
    let mut multipart = Multipart::from_request(req, state)
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart body: {}", e.body_text())))?;

    let mut raw = RawFields::default();
    let mut seen = HashSet::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        let key = match name.as_str() {
            "zona" => "region",
            other => other,
        };
        if is_known(key) && !seen.insert(key.to_string()) {
            return Err(AppError::validation(format!("duplicate field `{key}`")));
        }
        match name.as_str() {
            "username" => raw.username = Some(text(field).await?),
            "password" => raw.password = Some(text(field).await?),
            "role" => raw.role = Some(text(field).await?),
            "region" | "zona" => raw.region = Some(text(field).await?),
            "clear_region" => raw.clear_region = flag(&name, &text(field).await?)?,
            "clear_image" => raw.clear_image = flag(&name, &text(field).await?)?,
            "image" => {
                raw.image = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(format!("Failed to read image: {e}")))?,
                );
            }
            _ => {}
        }
    }

    Ok(raw)
}

fn is_known(key: &str) -> bool {
    matches!(
        key,
        "username" | "password" | "role" | "region" | "clear_region" | "clear_image" | "image"
    )
}

async fn text(field: Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::validation(format!("Read error: {e}")))
}

fn flag(name: &str, value: &str) -> Result<bool, AppError> {
    match value.trim() {
        "" | "false" | "0" => Ok(false),
        "true" | "1" => Ok(true),
        other => Err(AppError::validation(format!(
            "{name} must be true or false, got '{other}'"
        ))),
    }
}

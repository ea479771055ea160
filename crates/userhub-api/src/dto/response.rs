//! Response DTOs.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use userhub_core::types::AccountId;
use userhub_entity::account::{Account, ImageRef};
use userhub_service::account::LoginResult;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Account as returned to clients. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: AccountId,
    /// Username.
    pub username: String,
    /// Role.
    pub role: String,
    /// Region.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Inline images as base64, file-backed images as their storage path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        let image = account.image.map(|image| match image {
            ImageRef::Inline(bytes) => STANDARD.encode(bytes),
            ImageRef::Path(path) => path,
        });
        Self {
            id: account.id,
            username: account.username,
            role: account.role.into(),
            region: account.region,
            image,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token.
    pub token: String,
    /// Username.
    pub username: String,
    /// Role.
    pub role: String,
    /// Region.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl From<LoginResult> for LoginResponse {
    fn from(result: LoginResult) -> Self {
        Self {
            token: result.token,
            username: result.account.username,
            role: result.account.role.into(),
            region: result.account.region,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "ok" when every dependency is reachable.
    pub status: String,
    /// Service version.
    pub version: String,
}

//! Request DTOs with validation.

use serde::Deserialize;
use validator::Validate;

/// Login request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// JSON shape of an account submission.
///
/// Every field is optional; empty strings count as absent. `zona` is an
/// accepted alias of `region`, and `image` is standard base64.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountPayload {
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    #[serde(alias = "zona")]
    pub region: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub clear_region: bool,
    #[serde(default)]
    pub clear_image: bool,
}

//! Token creation with the configured secret and TTL.

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use userhub_core::config::AuthConfig;
use userhub_core::error::AppError;
use userhub_core::types::AccountId;
use userhub_entity::account::Role;

use super::claims::Claims;

/// Creates signed HS256 tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder").field("ttl", &self.ttl).finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let minutes = i64::try_from(config.token_ttl_minutes).unwrap_or(60);
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl: Duration::minutes(minutes),
        }
    }

    /// Issues a token that expires after the configured TTL.
    pub fn issue(
        &self,
        subject: AccountId,
        role: &Role,
        region: Option<&str>,
    ) -> Result<String, AppError> {
        self.issue_with_ttl(subject, role, region, self.ttl)
    }

    /// Issues a token that expires `ttl` from now.
    ///
    /// A negative `ttl` yields a token that is already expired.
    pub fn issue_with_ttl(
        &self,
        subject: AccountId,
        role: &Role,
        region: Option<&str>,
        ttl: Duration,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject,
            role: role.clone(),
            region: region.map(str::to_string),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }
}

//! Token validation.

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use thiserror::Error;

use userhub_core::config::AuthConfig;
use userhub_core::error::AppError;

use super::claims::Claims;

/// Why a token was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Signature was valid but the token is past its expiry.
    #[error("Token has expired")]
    Expired,
    /// Malformed, wrongly signed, or missing required claims.
    #[error("Invalid token: {0}")]
    Invalid(String),
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        AppError::unauthorized(err.to_string())
    }
}

/// Validates HS256 tokens.
///
/// The signature is checked before any claim is trusted. Expiry is strict:
/// a token is valid while `now <= exp`, with no clock-skew leeway.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a token string.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                JwtErrorKind::InvalidSignature => {
                    TokenError::Invalid("signature mismatch".to_string())
                }
                JwtErrorKind::InvalidToken | JwtErrorKind::Base64(_) => {
                    TokenError::Invalid("malformed token".to_string())
                }
                _ => TokenError::Invalid(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use userhub_core::error::ErrorKind;
    use userhub_core::types::AccountId;
    use userhub_entity::account::Role;

    use super::*;
    use crate::jwt::JwtEncoder;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_issue_then_validate() {
        let cfg = config("test-secret-at-least-16");
        let id = AccountId::new();
        let token = JwtEncoder::new(&cfg)
            .issue(id, &Role::user(), Some("north"))
            .unwrap();

        let claims = JwtDecoder::new(&cfg).validate(&token).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.role, Role::user());
        assert_eq!(claims.region.as_deref(), Some("north"));
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_region_omitted_when_absent() {
        let cfg = config("test-secret-at-least-16");
        let token = JwtEncoder::new(&cfg)
            .issue(AccountId::new(), &Role::admin(), None)
            .unwrap();
        let claims = JwtDecoder::new(&cfg).validate(&token).unwrap();
        assert!(claims.region.is_none());

        let json = serde_json::to_value(&claims).unwrap();
        assert!(json.get("region").is_none());
    }

    #[test]
    fn test_expired_token() {
        let cfg = config("test-secret-at-least-16");
        let token = JwtEncoder::new(&cfg)
            .issue_with_ttl(AccountId::new(), &Role::user(), None, Duration::seconds(-10))
            .unwrap();
        assert_eq!(
            JwtDecoder::new(&cfg).validate(&token),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = JwtEncoder::new(&config("first-secret-0123456"))
            .issue(AccountId::new(), &Role::admin(), None)
            .unwrap();
        let result = JwtDecoder::new(&config("second-secret-012345")).validate(&token);
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_expired_with_wrong_secret_is_invalid() {
        let token = JwtEncoder::new(&config("first-secret-0123456"))
            .issue_with_ttl(AccountId::new(), &Role::user(), None, Duration::seconds(-10))
            .unwrap();
        let result = JwtDecoder::new(&config("second-secret-012345")).validate(&token);
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_tampered_payload_is_invalid() {
        let cfg = config("test-secret-at-least-16");
        let token = JwtEncoder::new(&cfg)
            .issue(AccountId::new(), &Role::user(), None)
            .unwrap();
        let admin = JwtEncoder::new(&cfg)
            .issue(AccountId::new(), &Role::admin(), None)
            .unwrap();

        let mut parts: Vec<&str> = token.split('.').collect();
        let admin_payload = admin.split('.').nth(1).unwrap();
        parts[1] = admin_payload;
        let forged = parts.join(".");

        let result = JwtDecoder::new(&cfg).validate(&forged);
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_garbage_is_invalid_and_maps_to_401_kind() {
        let cfg = config("test-secret-at-least-16");
        let err = JwtDecoder::new(&cfg).validate("not.a.token").unwrap_err();
        assert!(matches!(err, TokenError::Invalid(_)));
        assert_eq!(AppError::from(err).kind, ErrorKind::Authentication);
    }
}

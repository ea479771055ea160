//! Identity of the caller behind an authenticated request.

use userhub_auth::jwt::Claims;
use userhub_core::types::AccountId;
use userhub_entity::account::Role;

/// Authenticated caller, derived from validated token claims.
///
/// Inserted into request extensions by the role gate; handlers read it
/// instead of the raw token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// The caller's account id.
    pub account_id: AccountId,
    /// The caller's role at the time the token was issued.
    pub role: Role,
    /// The caller's region, if any.
    pub region: Option<String>,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            account_id: claims.sub,
            role: claims.role,
            region: claims.region,
        }
    }
}

//! JWT claims carried by every bearer token.

use serde::{Deserialize, Serialize};

use userhub_core::types::AccountId;
use userhub_entity::account::Role;

/// Claims payload embedded in every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the account id.
    pub sub: AccountId,
    /// Account role at the time of issuance.
    pub role: Role,
    /// Account region, when the deployment uses regions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

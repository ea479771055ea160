//! Role gate: bearer-token authentication plus role check for one route.
//!
//! Each gate carries one [`RoleSet`]. On success the caller's [`Identity`]
//! is attached to the request extensions. Gates compose: when several are
//! stacked on a route, every one must pass, and inner gates reuse the
//! identity an outer gate already attached.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use tracing::debug;

use userhub_auth::jwt::JwtDecoder;
use userhub_auth::rbac::RoleSet;
use userhub_core::error::AppError;
use userhub_service::context::Identity;

use crate::error::ApiError;

/// State of one gate layer.
#[derive(Debug, Clone)]
pub struct RoleGate {
    roles: RoleSet,
    decoder: Arc<JwtDecoder>,
}

impl RoleGate {
    /// Creates a gate admitting `roles`.
    pub fn new(roles: RoleSet, decoder: Arc<JwtDecoder>) -> Self {
        Self { roles, decoder }
    }

    /// Resolves the caller, reusing an identity attached by an outer gate.
    fn identify(&self, request: &Request) -> Result<Identity, AppError> {
        if let Some(identity) = request.extensions().get::<Identity>() {
            return Ok(identity.clone());
        }

        let bearer = request
            .headers()
            .typed_get::<Authorization<Bearer>>()
            .ok_or_else(|| AppError::unauthorized("Missing or malformed bearer token"))?;

        let claims = self.decoder.validate(bearer.token())?;
        Ok(Identity::from(claims))
    }
}

/// Middleware body for a [`RoleGate`]; install with `from_fn_with_state`.
///
/// Missing, malformed, invalid, or expired tokens yield 401; a role
/// outside the gate's set yields 403. The handler runs only on success.
pub async fn require_roles(
    State(gate): State<Arc<RoleGate>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = gate.identify(&request)?;
    gate.roles.check(&identity.role)?;

    debug!(
        account_id = %identity.account_id,
        role = %identity.role,
        path = %request.uri().path(),
        "Role gate passed"
    );

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

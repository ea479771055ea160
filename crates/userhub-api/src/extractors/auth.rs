//! `Caller` extractor: the identity a role gate attached, if any.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use userhub_service::context::Identity;

/// Identity of the caller on gated routes; `None` on public ones.
#[derive(Debug, Clone)]
pub struct Caller(pub Option<Identity>);

impl Caller {
    /// Returns the identity, if the route was gated.
    pub fn identity(&self) -> Option<&Identity> {
        self.0.as_ref()
    }
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Caller(parts.extensions.get::<Identity>().cloned()))
    }
}

//! Axum middleware stack.

pub mod auth;
pub mod logging;

pub use auth::{RoleGate, require_roles};
pub use logging::request_logging;

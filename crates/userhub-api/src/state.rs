//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use userhub_auth::jwt::JwtDecoder;
use userhub_auth::rbac::RoleSet;
use userhub_core::config::{AppConfig, GateConfig};
use userhub_core::result::AppResult;
use userhub_service::account::AccountService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Account use cases
    pub accounts: Arc<AccountService>,
    /// Token validator used by role gates
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Role sets per gated route
    pub gates: Arc<RouteGates>,
}

/// Role set required by each gated route.
#[derive(Debug, Clone, Default)]
pub struct RouteGates {
    /// `POST /register`
    pub register: RoleSet,
    /// `GET /users`, `GET /users/{id}`
    pub list: RoleSet,
    /// `PUT /update/{id}`
    pub update: RoleSet,
    /// `DELETE /delete/{id}`
    pub delete: RoleSet,
}

impl RouteGates {
    /// Builds gates from configuration.
    pub fn from_config(config: &GateConfig) -> AppResult<Self> {
        Ok(Self {
            register: RoleSet::from_names(&config.register)?,
            list: RoleSet::from_names(&config.list)?,
            update: RoleSet::from_names(&config.update)?,
            delete: RoleSet::from_names(&config.delete)?,
        })
    }
}

//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field carries a default so a bare deployment boots.

pub mod accounts;
pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use self::accounts::{AccountsConfig, GateConfig};
pub use self::app::ServerConfig;
pub use self::auth::{Argon2Config, AuthConfig};
pub use self::database::{DatabaseBackend, DatabaseConfig};
pub use self::logging::LoggingConfig;
pub use self::storage::{ImageStorageMode, StorageConfig};

use crate::error::AppError;

/// Upper bound on token lifetime (one year).
const MAX_TOKEN_TTL_MINUTES: u64 = 366 * 24 * 60;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Account store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Token and credential settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Profile image storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Account policy and route gates.
    #[serde(default)]
    pub accounts: AccountsConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `<dir>/default.toml` with an environment-specific overlay
    /// `<dir>/<env>.toml` and environment variables prefixed with `USERHUB__`.
    pub fn load(dir: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("USERHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("accounts.recognized_roles")
                    .with_list_parse_key("accounts.gates.register")
                    .with_list_parse_key("accounts.gates.list")
                    .with_list_parse_key("accounts.gates.update")
                    .with_list_parse_key("accounts.gates.delete")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Checks cross-field constraints the individual sections cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.jwt_secret.len() < 16 {
            return Err(AppError::configuration(
                "auth.jwt_secret must be at least 16 bytes",
            ));
        }

        if self.auth.token_ttl_minutes == 0 || self.auth.token_ttl_minutes > MAX_TOKEN_TTL_MINUTES {
            return Err(AppError::configuration(format!(
                "auth.token_ttl_minutes must be between 1 and {MAX_TOKEN_TTL_MINUTES}"
            )));
        }

        if self.database.backend == DatabaseBackend::Postgres && self.database.url.is_empty() {
            return Err(AppError::configuration(
                "database.url is required for the postgres backend",
            ));
        }

        if !self
            .accounts
            .recognized_roles
            .contains(&self.accounts.default_role)
        {
            return Err(AppError::configuration(format!(
                "accounts.default_role '{}' is not one of the recognized roles",
                self.accounts.default_role
            )));
        }

        for role in self.accounts.gates.all_roles() {
            if !self.accounts.recognized_roles.contains(role) {
                return Err(AppError::configuration(format!(
                    "Gate role '{role}' is not one of the recognized roles"
                )));
            }
        }

        Ok(())
    }
}

//! Account role.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use userhub_core::AppError;

/// Role name of a plain account.
pub const USER: &str = "user";
/// Role name of an administrator.
pub const ADMIN: &str = "admin";
/// Role name of a developer account.
pub const DEV: &str = "dev";

/// An account role.
///
/// Roles form an open set of names; which ones a deployment accepts is
/// configuration. There is no hierarchy: `dev` never implies `admin`.
/// Comparison is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Role(String);

impl Role {
    /// Creates a role, rejecting empty or whitespace-padded names.
    pub fn new(name: impl Into<String>) -> Result<Self, AppError> {
        let name = name.into();
        if name.is_empty() {
            return Err(AppError::validation("Role must not be empty"));
        }
        if name.trim() != name {
            return Err(AppError::validation(format!(
                "Role '{name}' must not have surrounding whitespace"
            )));
        }
        Ok(Self(name))
    }

    /// The default role for new accounts.
    pub fn user() -> Self {
        Self(USER.to_string())
    }

    /// The administrator role.
    pub fn admin() -> Self {
        Self(ADMIN.to_string())
    }

    /// Return the role name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Role {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> String {
        role.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rejected() {
        assert!(Role::new("").is_err());
        assert!(Role::new(" admin").is_err());
    }

    #[test]
    fn test_case_sensitive() {
        assert_ne!(Role::new("Admin").unwrap(), Role::admin());
        assert_eq!("admin".parse::<Role>().unwrap(), Role::admin());
    }

    #[test]
    fn test_serde_as_plain_string() {
        let json = serde_json::to_string(&Role::user()).unwrap();
        assert_eq!(json, "\"user\"");
        assert!(serde_json::from_str::<Role>("\"\"").is_err());
    }
}

//! Role sets attached to gated routes.

use std::collections::BTreeSet;
use std::fmt;

use userhub_core::error::AppError;
use userhub_entity::account::Role;

/// Roles allowed through one gate.
///
/// Membership is exact string equality. There is no hierarchy, so a set
/// containing only `admin` rejects `dev`. An empty set means the route is
/// public and no gate is installed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet {
    roles: BTreeSet<Role>,
}

impl RoleSet {
    /// Builds a set from roles.
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            roles: roles.into_iter().collect(),
        }
    }

    /// Builds a set from configured role names.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, AppError> {
        let roles = names
            .iter()
            .map(|n| Role::new(n.as_ref()))
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self { roles })
    }

    /// Returns `true` when no role is required.
    pub fn is_public(&self) -> bool {
        self.roles.is_empty()
    }

    /// Whether `role` is a member.
    pub fn allows(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }

    /// Fails with a forbidden error unless `role` is a member.
    pub fn check(&self, role: &Role) -> Result<(), AppError> {
        if self.allows(role) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Role '{role}' may not access this resource (requires one of: {self})"
            )))
        }
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for role in &self.roles {
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(role.as_str())?;
            first = false;
        }
        Ok(())
    }
}

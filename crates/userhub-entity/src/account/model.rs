//! Account entity model.

use std::fmt;

use chrono::{DateTime, Utc};

use userhub_core::types::{AccountId, Patch};

use super::image::ImageRef;
use super::role::Role;

/// A registered account.
///
/// The password hash is deliberately absent from every output
/// representation; API responses are built from dedicated DTOs.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    /// Unique account identifier.
    pub id: AccountId,
    /// Unique login name (case-sensitive).
    pub username: String,
    /// Argon2 password hash (PHC string).
    pub password_hash: String,
    /// Account role.
    pub role: Role,
    /// Region tag, present only in deployments that partition by region.
    pub region: Option<String>,
    /// Profile image, if any.
    pub image: Option<ImageRef>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Builds a fresh account from creation data.
    pub fn from_new(data: NewAccount, now: DateTime<Utc>) -> Self {
        Self {
            id: data.id,
            username: data.username,
            password_hash: data.password_hash,
            role: data.role,
            region: data.region,
            image: data.image,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies resolved changes in place. Untouched fields keep their values.
    pub fn apply(&mut self, changes: AccountChanges, now: DateTime<Utc>) {
        if let Patch::Set(username) = changes.username {
            self.username = username;
        }
        if let Patch::Set(hash) = changes.password_hash {
            self.password_hash = hash;
        }
        if let Patch::Set(role) = changes.role {
            self.role = role;
        }
        self.region = changes.region.apply_to(self.region.take());
        self.image = changes.image.apply_to(self.image.take());
        self.updated_at = now;
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("role", &self.role)
            .field("region", &self.region)
            .field("image", &self.image)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Data required to create a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Identifier chosen before insert so stored images can be keyed by it.
    pub id: AccountId,
    /// Desired username.
    pub username: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role (already defaulted).
    pub role: Role,
    /// Region tag.
    pub region: Option<String>,
    /// Already-persisted image reference.
    pub image: Option<ImageRef>,
}

/// Resolved partial update, ready for the repository.
///
/// Username, password, and role can only be set, never cleared.
#[derive(Debug, Clone, Default)]
pub struct AccountChanges {
    /// New username.
    pub username: Patch<String>,
    /// New password hash.
    pub password_hash: Patch<String>,
    /// New role.
    pub role: Patch<Role>,
    /// New or cleared region.
    pub region: Patch<String>,
    /// New or cleared image reference.
    pub image: Patch<ImageRef>,
}

impl AccountChanges {
    /// Returns `true` when no field would change.
    pub fn is_empty(&self) -> bool {
        self.username.is_unchanged()
            && self.password_hash.is_unchanged()
            && self.role.is_unchanged()
            && self.region.is_unchanged()
            && self.image.is_unchanged()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Account {
        Account::from_new(
            NewAccount {
                id: AccountId::new(),
                username: "alice".to_string(),
                password_hash: "$argon2id$stub".to_string(),
                role: Role::user(),
                region: Some("north".to_string()),
                image: Some(ImageRef::Inline(vec![1, 2, 3])),
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_apply_password_only() {
        let mut account = sample();
        let before = account.clone();
        account.apply(
            AccountChanges {
                password_hash: Patch::Set("$argon2id$new".to_string()),
                ..Default::default()
            },
            Utc::now(),
        );
        assert_eq!(account.password_hash, "$argon2id$new");
        assert_eq!(account.username, before.username);
        assert_eq!(account.role, before.role);
        assert_eq!(account.region, before.region);
        assert_eq!(account.image, before.image);
        assert_eq!(account.id, before.id);
    }

    #[test]
    fn test_apply_clear_region() {
        let mut account = sample();
        account.apply(
            AccountChanges {
                region: Patch::Clear,
                ..Default::default()
            },
            Utc::now(),
        );
        assert!(account.region.is_none());
        assert!(account.image.is_some());
    }

    #[test]
    fn test_debug_redacts_hash() {
        let rendered = format!("{:?}", sample());
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("argon2id"));
    }

    #[test]
    fn test_empty_changes() {
        assert!(AccountChanges::default().is_empty());
        let changes = AccountChanges {
            role: Patch::Set(Role::admin()),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }
}

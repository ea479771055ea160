//! Account use cases: register, login, list, fetch, update, delete.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{info, warn};

use userhub_auth::jwt::JwtEncoder;
use userhub_auth::password::CredentialHasher;
use userhub_core::config::AccountsConfig;
use userhub_core::error::AppError;
use userhub_core::result::AppResult;
use userhub_core::types::{AccountId, Patch};
use userhub_database::repositories::AccountRepository;
use userhub_entity::account::{Account, AccountChanges, NewAccount, Role};
use userhub_storage::ImageStore;

use super::submission::AccountSubmission;
use crate::context::Identity;

/// Deployment rules applied to every account write.
#[derive(Debug, Clone)]
pub struct AccountPolicy {
    /// Whether accounts carry a region.
    pub has_region: bool,
    /// Roles that may be assigned.
    pub recognized_roles: BTreeSet<Role>,
    /// Role assigned when registration omits one.
    pub default_role: Role,
    /// Whether deleting an account removes its stored image.
    pub delete_image_with_account: bool,
}

impl AccountPolicy {
    /// Builds the policy from configuration.
    pub fn from_config(config: &AccountsConfig) -> AppResult<Self> {
        let recognized_roles = config
            .recognized_roles
            .iter()
            .map(|name| Role::new(name.as_str()))
            .collect::<AppResult<BTreeSet<_>>>()?;
        let default_role = Role::new(config.default_role.as_str())?;
        if !recognized_roles.contains(&default_role) {
            return Err(AppError::configuration(format!(
                "Default role '{default_role}' is not recognized"
            )));
        }
        Ok(Self {
            has_region: config.has_region,
            recognized_roles,
            default_role,
            delete_image_with_account: config.delete_image_with_account,
        })
    }

    fn resolve_role(&self, name: &str) -> AppResult<Role> {
        let role = Role::new(name)?;
        if !self.recognized_roles.contains(&role) {
            return Err(AppError::validation(format!("Unrecognized role '{role}'")));
        }
        Ok(role)
    }
}

/// Successful authentication.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// Signed bearer token.
    pub token: String,
    /// The authenticated account.
    pub account: Account,
}

/// Orchestrates account persistence, credentials, tokens, and images.
#[derive(Debug, Clone)]
pub struct AccountService {
    /// Account store.
    repo: Arc<dyn AccountRepository>,
    /// Profile image store.
    images: Arc<ImageStore>,
    /// Password hasher.
    hasher: Arc<dyn CredentialHasher>,
    /// Token issuer.
    encoder: Arc<JwtEncoder>,
    /// Deployment rules.
    policy: AccountPolicy,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        repo: Arc<dyn AccountRepository>,
        images: Arc<ImageStore>,
        hasher: Arc<dyn CredentialHasher>,
        encoder: Arc<JwtEncoder>,
        policy: AccountPolicy,
    ) -> Self {
        Self {
            repo,
            images,
            hasher,
            encoder,
            policy,
        }
    }

    /// Registers a new account.
    ///
    /// Username and password are required, as is the region when regions
    /// are enabled. A missing role becomes the default role.
    pub async fn register(&self, submission: AccountSubmission) -> AppResult<Account> {
        let username = required(submission.username, "username")?;
        let password = required(submission.password, "password")?;

        let role = match submission.role {
            Patch::Set(name) => self.policy.resolve_role(&name)?,
            Patch::Unchanged => self.policy.default_role.clone(),
            Patch::Clear => return Err(AppError::validation("role cannot be cleared")),
        };

        let region = match (self.policy.has_region, submission.region) {
            (true, Patch::Set(region)) => Some(region),
            (true, _) => return Err(AppError::validation("region is required")),
            (false, Patch::Unchanged) => None,
            (false, _) => {
                return Err(AppError::validation(
                    "region is not supported by this deployment",
                ));
            }
        };

        if let Patch::Clear = submission.image {
            return Err(AppError::validation("image cannot be cleared at registration"));
        }

        if self.repo.find_by_username(&username).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Username '{username}' already exists"
            )));
        }

        let password_hash = self.hash(password).await?;
        let id = AccountId::new();

        let image = match submission.image {
            Patch::Set(bytes) => Some(self.images.put(id, bytes).await?),
            _ => None,
        };

        let data = NewAccount {
            id,
            username,
            password_hash,
            role,
            region,
            image: image.clone(),
        };

        match self.repo.create(data).await {
            Ok(account) => {
                info!(
                    account_id = %account.id,
                    username = %account.username,
                    role = %account.role,
                    "Account registered"
                );
                Ok(account)
            }
            Err(e) => {
                if let Some(staged) = &image {
                    self.images.delete(staged).await;
                }
                Err(e)
            }
        }
    }

    /// Verifies credentials and issues a token.
    ///
    /// An unknown username and a wrong password are indistinguishable to
    /// the caller.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginResult> {
        if username.is_empty() || password.is_empty() {
            return Err(AppError::validation("username and password are required"));
        }

        let Some(account) = self.repo.find_by_username(username).await? else {
            // Pay the same verification cost as a known account.
            let dummy = self.hasher.dummy_hash().to_string();
            let _ = self.verify(password.to_string(), dummy).await;
            info!(username = %username, "Login rejected: unknown username");
            return Err(invalid_credentials());
        };

        if !self
            .verify(password.to_string(), account.password_hash.clone())
            .await?
        {
            info!(account_id = %account.id, "Login rejected: wrong password");
            return Err(invalid_credentials());
        }

        let token = self
            .encoder
            .issue(account.id, &account.role, account.region.as_deref())?;

        info!(account_id = %account.id, role = %account.role, "Login succeeded");
        Ok(LoginResult { token, account })
    }

    /// Lists all accounts.
    pub async fn list(&self) -> AppResult<Vec<Account>> {
        self.repo.list().await
    }

    /// Fetches one account.
    pub async fn get(&self, id: AccountId) -> AppResult<Account> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))
    }

    /// Applies a partial update.
    ///
    /// Only provided fields change. A new image is stored before the record
    /// is committed; if the commit fails the new image is removed, and the
    /// previous image is removed only after the commit succeeds.
    pub async fn update(
        &self,
        actor: Option<&Identity>,
        id: AccountId,
        submission: AccountSubmission,
    ) -> AppResult<Account> {
        for (field, cleared) in [
            ("username", matches!(submission.username, Patch::Clear)),
            ("password", matches!(submission.password, Patch::Clear)),
            ("role", matches!(submission.role, Patch::Clear)),
        ] {
            if cleared {
                return Err(AppError::validation(format!("{field} cannot be cleared")));
            }
        }
        if !self.policy.has_region && !submission.region.is_unchanged() {
            return Err(AppError::validation(
                "region is not supported by this deployment",
            ));
        }

        let role = match &submission.role {
            Patch::Set(name) => Patch::Set(self.policy.resolve_role(name)?),
            _ => Patch::Unchanged,
        };

        let existing = self.get(id).await?;
        if submission.is_empty() {
            return Ok(existing);
        }

        let password_hash = match submission.password {
            Patch::Set(password) => Patch::Set(self.hash(password).await?),
            _ => Patch::Unchanged,
        };

        let changes = AccountChanges {
            username: submission.username,
            password_hash,
            role,
            region: submission.region,
            image: Patch::Unchanged,
        };

        let updated = match submission.image {
            Patch::Set(bytes) => {
                self.images
                    .replace(existing.image.as_ref(), id, bytes, |image| {
                        self.repo.update(
                            id,
                            AccountChanges {
                                image: Patch::Set(image),
                                ..changes
                            },
                        )
                    })
                    .await?
            }
            Patch::Clear => {
                let updated = self
                    .repo
                    .update(
                        id,
                        AccountChanges {
                            image: Patch::Clear,
                            ..changes
                        },
                    )
                    .await?;
                if let Some(old) = &existing.image {
                    self.images.delete(old).await;
                }
                updated
            }
            Patch::Unchanged => self.repo.update(id, changes).await?,
        };

        info!(
            account_id = %id,
            actor = ?actor.map(|a| a.account_id),
            "Account updated"
        );
        Ok(updated)
    }

    /// Deletes an account and, by policy, its stored image.
    pub async fn delete(&self, actor: Option<&Identity>, id: AccountId) -> AppResult<()> {
        let removed = self
            .repo
            .delete(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))?;

        if self.policy.delete_image_with_account {
            if let Some(image) = &removed.image {
                self.images.delete(image).await;
            }
        }

        info!(
            account_id = %id,
            username = %removed.username,
            actor = ?actor.map(|a| a.account_id),
            "Account deleted"
        );
        Ok(())
    }

    /// Whether the account store and image store are usable.
    pub async fn health_check(&self) -> AppResult<bool> {
        let store = self.repo.health_check().await?;
        let images = self.images.health_check().await?;
        if !images {
            warn!("Image storage is unavailable");
        }
        Ok(store && images)
    }

    async fn hash(&self, password: String) -> AppResult<String> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash_password(&password))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
    }

    async fn verify(&self, password: String, hash: String) -> AppResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify_password(&password, &hash))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
    }
}

fn required(value: Patch<String>, field: &str) -> AppResult<String> {
    match value {
        Patch::Set(v) => Ok(v),
        _ => Err(AppError::validation(format!("{field} is required"))),
    }
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid username or password")
}

//! In-process account repository.
//!
//! Holds every account behind one async lock, so uniqueness checks and
//! writes happen atomically. Contents are lost when the process exits.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use userhub_core::AppError;
use userhub_core::result::AppResult;
use userhub_core::types::AccountId;
use userhub_entity::account::{Account, AccountChanges, NewAccount};

use super::AccountRepository;

#[derive(Debug, Default)]
struct Inner {
    accounts: HashMap<AccountId, Account>,
    /// Insertion order, used for listing.
    order: Vec<AccountId>,
}

impl Inner {
    fn username_taken(&self, username: &str, except: Option<AccountId>) -> bool {
        self.accounts
            .values()
            .any(|a| a.username == username && Some(a.id) != except)
    }
}

/// Account repository backed by a process-local map.
#[derive(Debug, Clone, Default)]
pub struct MemoryAccountRepository {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryAccountRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn create(&self, data: NewAccount) -> AppResult<Account> {
        let mut inner = self.inner.write().await;
        if inner.username_taken(&data.username, None) {
            return Err(AppError::conflict(format!(
                "Username '{}' already exists",
                data.username
            )));
        }
        if inner.accounts.contains_key(&data.id) {
            return Err(AppError::conflict(format!(
                "Account {} already exists",
                data.id
            )));
        }

        let account = Account::from_new(data, Utc::now());
        debug!(account_id = %account.id, "Stored account in memory");
        inner.order.push(account.id);
        inner.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        Ok(self.inner.read().await.accounts.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        Ok(self
            .inner
            .read()
            .await
            .accounts
            .values()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<Account>> {
        let inner = self.inner.read().await;
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.accounts.get(id).cloned())
            .collect())
    }

    async fn update(&self, id: AccountId, changes: AccountChanges) -> AppResult<Account> {
        let mut inner = self.inner.write().await;
        let Some(current) = inner.accounts.get(&id) else {
            return Err(AppError::not_found(format!("Account {id} not found")));
        };
        if changes.is_empty() {
            return Ok(current.clone());
        }
        if let Some(username) = changes.username.as_set() {
            if inner.username_taken(username, Some(id)) {
                return Err(AppError::conflict(format!(
                    "Username '{username}' already exists"
                )));
            }
        }

        let account = inner
            .accounts
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))?;
        account.apply(changes, Utc::now());
        Ok(account.clone())
    }

    async fn delete(&self, id: AccountId) -> AppResult<Option<Account>> {
        let mut inner = self.inner.write().await;
        let removed = inner.accounts.remove(&id);
        if removed.is_some() {
            inner.order.retain(|other| *other != id);
        }
        Ok(removed)
    }
}

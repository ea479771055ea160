//! Account repository contract and its implementations.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use userhub_core::result::AppResult;
use userhub_core::types::AccountId;
use userhub_entity::account::{Account, AccountChanges, NewAccount};

pub use memory::MemoryAccountRepository;
pub use postgres::PgAccountRepository;

/// Persistent store of accounts.
///
/// Username uniqueness is enforced by the store itself: of several
/// concurrent `create` (or renaming `update`) calls for one username,
/// exactly one succeeds and the others fail with a conflict error.
#[async_trait]
pub trait AccountRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Short name of the backing store, for logs.
    fn backend_name(&self) -> &'static str;

    /// Whether the store is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Inserts a new account. Fails with `Conflict` if the username is taken.
    async fn create(&self, data: NewAccount) -> AppResult<Account>;

    /// Looks up an account by id.
    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>>;

    /// Looks up an account by exact username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>>;

    /// Returns every account, oldest first.
    async fn list(&self) -> AppResult<Vec<Account>>;

    /// Applies `changes` atomically and returns the stored result.
    ///
    /// Fails with `NotFound` when the account does not exist and with
    /// `Conflict` when a new username is already taken. An empty change set
    /// returns the stored account without touching `updated_at`.
    async fn update(&self, id: AccountId, changes: AccountChanges) -> AppResult<Account>;

    /// Removes an account, returning what was stored, or `None` if absent.
    async fn delete(&self, id: AccountId) -> AppResult<Option<Account>>;
}

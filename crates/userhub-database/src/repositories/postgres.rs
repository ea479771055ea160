//! PostgreSQL account repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use userhub_core::error::{AppError, ErrorKind};
use userhub_core::result::AppResult;
use userhub_core::types::AccountId;
use userhub_entity::account::{Account, AccountChanges, ImageRef, NewAccount, Role};

use super::AccountRepository;

const USERNAME_CONSTRAINT: &str = "accounts_username_key";

/// Row shape of the `accounts` table.
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: AccountId,
    username: String,
    password_hash: String,
    role: String,
    region: Option<String>,
    image_data: Option<Vec<u8>>,
    image_path: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AppError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let role = Role::new(row.role).map_err(|e| {
            AppError::new(
                ErrorKind::Database,
                format!("Account {} has an invalid stored role: {}", row.id, e.message),
            )
        })?;
        let image = match (row.image_data, row.image_path) {
            (Some(bytes), _) => Some(ImageRef::Inline(bytes)),
            (None, Some(path)) => Some(ImageRef::Path(path)),
            (None, None) => None,
        };
        Ok(Self {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            role,
            region: row.region,
            image,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Account repository backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    /// Create a new account repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps a write error, turning a username collision into a conflict.
fn map_write_error(e: sqlx::Error, username: Option<&str>, context: &str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(USERNAME_CONSTRAINT) => {
            AppError::conflict(format!(
                "Username '{}' already exists",
                username.unwrap_or_default()
            ))
        }
        _ => AppError::with_source(ErrorKind::Database, context.to_string(), e),
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }

    async fn create(&self, data: NewAccount) -> AppResult<Account> {
        let (image_data, image_path) = split_image(data.image.as_ref());
        let row = sqlx::query_as::<_, AccountRow>(
            "INSERT INTO accounts (id, username, password_hash, role, region, image_data, image_path) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(data.id)
        .bind(&data.username)
        .bind(&data.password_hash)
        .bind(data.role.as_str())
        .bind(&data.region)
        .bind(image_data)
        .bind(image_path)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, Some(&data.username), "Failed to create account"))?;

        row.try_into()
    }

    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, AccountRow>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by id", e)
            })?
            .map(Account::try_from)
            .transpose()
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, AccountRow>("SELECT * FROM accounts WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by username", e)
            })?
            .map(Account::try_from)
            .transpose()
    }

    async fn list(&self) -> AppResult<Vec<Account>> {
        sqlx::query_as::<_, AccountRow>("SELECT * FROM accounts ORDER BY created_at ASC, id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list accounts", e))?
            .into_iter()
            .map(Account::try_from)
            .collect()
    }

    async fn update(&self, id: AccountId, changes: AccountChanges) -> AppResult<Account> {
        if changes.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Account {id} not found")));
        }

        let username = changes.username.as_set().map(String::as_str);
        let (image_data, image_path) = split_image(changes.image.as_set());

        sqlx::query_as::<_, AccountRow>(
            "UPDATE accounts SET \
                username = COALESCE($2, username), \
                password_hash = COALESCE($3, password_hash), \
                role = COALESCE($4, role), \
                region = CASE WHEN $5::BOOLEAN THEN $6::TEXT ELSE region END, \
                image_data = CASE WHEN $7::BOOLEAN THEN $8::BYTEA ELSE image_data END, \
                image_path = CASE WHEN $7::BOOLEAN THEN $9::TEXT ELSE image_path END, \
                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(username)
        .bind(changes.password_hash.as_set())
        .bind(changes.role.as_set().map(Role::as_str))
        .bind(!changes.region.is_unchanged())
        .bind(changes.region.as_set())
        .bind(!changes.image.is_unchanged())
        .bind(image_data)
        .bind(image_path)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, username, "Failed to update account"))?
        .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))?
        .try_into()
    }

    async fn delete(&self, id: AccountId) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, AccountRow>("DELETE FROM accounts WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete account", e))?
            .map(Account::try_from)
            .transpose()
    }
}

/// Splits an image reference into its `(image_data, image_path)` columns.
fn split_image(image: Option<&ImageRef>) -> (Option<&[u8]>, Option<&str>) {
    match image {
        Some(ImageRef::Inline(bytes)) => (Some(bytes.as_slice()), None),
        Some(ImageRef::Path(path)) => (None, Some(path.as_str())),
        None => (None, None),
    }
}

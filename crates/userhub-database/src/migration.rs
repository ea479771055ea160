//! Schema migrations for the account store.

use sqlx::PgPool;
use tracing::info;

use userhub_core::error::{AppError, ErrorKind};
use userhub_core::result::AppResult;

/// Applies every pending migration under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    info!("Applying account store migrations");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to run migrations: {e}"),
                e,
            )
        })?;

    Ok(())
}

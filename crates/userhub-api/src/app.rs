//! Application builder: wires the account store, image store, credential
//! and token services into [`AppState`] and serves the router.

use std::sync::Arc;

use userhub_auth::jwt::{JwtDecoder, JwtEncoder};
use userhub_auth::password::PasswordHasher;
use userhub_core::config::{AppConfig, DatabaseBackend};
use userhub_core::error::AppError;
use userhub_core::result::AppResult;
use userhub_database::{
    AccountRepository, DatabasePool, MemoryAccountRepository, PgAccountRepository,
};
use userhub_service::account::{AccountPolicy, AccountService};
use userhub_storage::ImageStore;

use crate::router::build_router;
use crate::state::{AppState, RouteGates};

/// Builds the application state, connecting to the configured account store.
///
/// A store that cannot be reached or migrated is an error; the caller is
/// expected to abort startup.
pub async fn build_state(config: AppConfig) -> AppResult<AppState> {
    let (repo, _pool) = connect_repository(&config).await?;
    build_state_with_repository(config, repo).await
}

/// Builds the application state around an already constructed repository.
pub async fn build_state_with_repository(
    config: AppConfig,
    repo: Arc<dyn AccountRepository>,
) -> AppResult<AppState> {
    let images = Arc::new(ImageStore::from_config(&config.storage).await?);
    let hasher = Arc::new(PasswordHasher::new(&config.auth.argon2)?);
    let encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
    let policy = AccountPolicy::from_config(&config.accounts)?;
    let gates = Arc::new(RouteGates::from_config(&config.accounts.gates)?);

    tracing::info!(
        store = repo.backend_name(),
        image_mode = ?images.mode(),
        has_region = policy.has_region,
        "Account service initialized"
    );

    let accounts = Arc::new(AccountService::new(repo, images, hasher, encoder, policy));

    Ok(AppState {
        config: Arc::new(config),
        accounts,
        jwt_decoder,
        gates,
    })
}

/// Runs the UserHub server until Ctrl+C is received.
pub async fn run_server(config: AppConfig) -> AppResult<()> {
    tracing::info!("Starting UserHub server...");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let (repo, pool) = connect_repository(&config).await?;
    let state = build_state_with_repository(config, repo).await?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("UserHub server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(pool) = pool {
        pool.close().await;
    }

    tracing::info!("UserHub server stopped");
    Ok(())
}

async fn connect_repository(
    config: &AppConfig,
) -> AppResult<(Arc<dyn AccountRepository>, Option<DatabasePool>)> {
    match config.database.backend {
        DatabaseBackend::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;
            let repo = PgAccountRepository::new(pool.pool().clone());
            Ok((Arc::new(repo), Some(pool)))
        }
        DatabaseBackend::Memory => {
            tracing::warn!("Using in-memory account store; data is lost on restart");
            Ok((Arc::new(MemoryAccountRepository::new()), None))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

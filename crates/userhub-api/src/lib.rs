//! # userhub-api
//!
//! HTTP API layer for UserHub built on Axum.
//!
//! Provides the account endpoints, the role-gate middleware, dual-shape
//! (multipart or JSON) request ingestion, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod ingest;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_state, build_state_with_repository, run_server};
pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;

//! # userhub-database
//!
//! PostgreSQL connection management and account repository
//! implementations (PostgreSQL and in-process memory).

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{AccountRepository, MemoryAccountRepository, PgAccountRepository};

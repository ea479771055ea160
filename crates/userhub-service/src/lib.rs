//! # userhub-service
//!
//! Account use cases. [`AccountService`] orchestrates the account
//! repository, image store, password hasher, and token encoder.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod account;
pub mod context;

pub use account::{AccountPolicy, AccountService, AccountSubmission, LoginResult};
pub use context::Identity;

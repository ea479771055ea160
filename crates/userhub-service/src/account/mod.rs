//! Account registration, authentication, and management.

pub mod service;
pub mod submission;

pub use service::{AccountPolicy, AccountService, LoginResult};
pub use submission::AccountSubmission;

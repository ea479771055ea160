//! Shared domain types.

pub mod id;
pub mod patch;

pub use id::AccountId;
pub use patch::Patch;

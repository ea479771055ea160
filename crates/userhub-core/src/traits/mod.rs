//! Core traits defined in `userhub-core` and implemented by other crates.

pub mod storage;

pub use storage::StorageProvider;

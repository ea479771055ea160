//! # userhub-storage
//!
//! Profile image persistence. Images are either kept inline in the
//! account record or written through a [`StorageProvider`] and referenced
//! by path.
//!
//! [`StorageProvider`]: userhub_core::traits::storage::StorageProvider

pub mod image_store;
pub mod providers;

pub use image_store::ImageStore;
pub use providers::local::LocalStorageProvider;

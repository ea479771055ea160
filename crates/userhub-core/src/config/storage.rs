//! Profile image storage configuration.

use serde::{Deserialize, Serialize};

/// How profile images are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageStorageMode {
    /// Image bytes stored on the account record itself.
    Inline,
    /// Image bytes written under `root_path`; the record keeps the relative path.
    PathRef,
}

/// Image storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage mode for profile images.
    #[serde(default = "default_mode")]
    pub image_mode: ImageStorageMode,
    /// Root directory for file-backed images.
    #[serde(default = "default_root")]
    pub root_path: String,
    /// Largest accepted image in bytes.
    #[serde(default = "default_max_image")]
    pub max_image_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            image_mode: default_mode(),
            root_path: default_root(),
            max_image_bytes: default_max_image(),
        }
    }
}

fn default_mode() -> ImageStorageMode {
    ImageStorageMode::Inline
}

fn default_root() -> String {
    "./data/images".to_string()
}

fn default_max_image() -> usize {
    5 * 1024 * 1024 // 5 MB
}

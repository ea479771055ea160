//! Profile image store.
//!
//! Turns uploaded image bytes into an [`ImageRef`] that an account record
//! can hold. In inline mode the bytes themselves are the reference; in
//! path mode they are written through a [`StorageProvider`] under
//! `images/<account>/<uuid>.<ext>`.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use image::ImageFormat;
use tracing::{debug, warn};
use uuid::Uuid;

use userhub_core::config::{ImageStorageMode, StorageConfig};
use userhub_core::error::{AppError, ErrorKind};
use userhub_core::result::AppResult;
use userhub_core::traits::storage::StorageProvider;
use userhub_core::types::AccountId;
use userhub_entity::account::ImageRef;

use crate::providers::local::LocalStorageProvider;

#[derive(Debug, Clone)]
enum Backend {
    Inline,
    Provider(Arc<dyn StorageProvider>),
}

/// Persists and removes profile images.
#[derive(Debug, Clone)]
pub struct ImageStore {
    backend: Backend,
    max_bytes: usize,
}

impl ImageStore {
    /// Store that keeps image bytes on the record.
    pub fn inline(max_bytes: usize) -> Self {
        Self {
            backend: Backend::Inline,
            max_bytes,
        }
    }

    /// Store that writes images through `provider` and keeps their path.
    pub fn with_provider(provider: Arc<dyn StorageProvider>, max_bytes: usize) -> Self {
        Self {
            backend: Backend::Provider(provider),
            max_bytes,
        }
    }

    /// Build the store described by `config`.
    pub async fn from_config(config: &StorageConfig) -> AppResult<Self> {
        match config.image_mode {
            ImageStorageMode::Inline => Ok(Self::inline(config.max_image_bytes)),
            ImageStorageMode::PathRef => {
                let provider = LocalStorageProvider::new(&config.root_path).await?;
                Ok(Self::with_provider(
                    Arc::new(provider),
                    config.max_image_bytes,
                ))
            }
        }
    }

    /// The configured storage mode.
    pub fn mode(&self) -> ImageStorageMode {
        match self.backend {
            Backend::Inline => ImageStorageMode::Inline,
            Backend::Provider(_) => ImageStorageMode::PathRef,
        }
    }

    /// Whether the backing storage is usable.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.backend {
            Backend::Inline => Ok(true),
            Backend::Provider(provider) => {
                let healthy = provider.health_check().await?;
                if !healthy {
                    warn!(provider = provider.provider_type(), "Image storage is unavailable");
                }
                Ok(healthy)
            }
        }
    }

    /// Checks size and format, returning the detected format.
    pub fn validate(&self, content: &[u8]) -> AppResult<ImageFormat> {
        if content.is_empty() {
            return Err(AppError::validation("Image is empty"));
        }
        if content.len() > self.max_bytes {
            return Err(AppError::validation(format!(
                "Image exceeds the {} byte limit",
                self.max_bytes
            )));
        }
        image::guess_format(content)
            .map_err(|_| AppError::validation("Image is not in a recognized format"))
    }

    /// Persists `content` for `account_id` and returns its reference.
    ///
    /// Nothing is written if validation fails. A write failure is an
    /// internal error.
    pub async fn put(&self, account_id: AccountId, content: Bytes) -> AppResult<ImageRef> {
        let format = self.validate(&content)?;

        match &self.backend {
            Backend::Inline => Ok(ImageRef::Inline(content.to_vec())),
            Backend::Provider(provider) => {
                let ext = format.extensions_str().first().copied().unwrap_or("img");
                let path = format!("images/{account_id}/{}.{ext}", Uuid::new_v4());
                let size = content.len();
                provider.write(&path, content).await.map_err(|e| {
                    AppError::with_source(ErrorKind::Internal, "Failed to store image", e)
                })?;
                debug!(account_id = %account_id, path = %path, size, "Stored image");
                Ok(ImageRef::Path(path))
            }
        }
    }

    /// Stores new content, hands its reference to `commit`, and only then
    /// removes `old` best-effort.
    ///
    /// If the content cannot be stored, `commit` never runs and `old` is left
    /// untouched. If `commit` fails, the new content is discarded and `old`
    /// is still left untouched.
    pub async fn replace<T, F, Fut>(
        &self,
        old: Option<&ImageRef>,
        account_id: AccountId,
        content: Bytes,
        commit: F,
    ) -> AppResult<T>
    where
        F: FnOnce(ImageRef) -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let new_ref = self.put(account_id, content).await?;
        let committed = match commit(new_ref.clone()).await {
            Ok(value) => value,
            Err(e) => {
                self.delete(&new_ref).await;
                return Err(e);
            }
        };
        if let Some(old) = old {
            if *old != new_ref {
                self.delete(old).await;
            }
        }
        Ok(committed)
    }

    /// Removes stored content for `image`. Missing content is not an error,
    /// and failures are logged rather than returned.
    pub async fn delete(&self, image: &ImageRef) {
        let ImageRef::Path(path) = image else {
            return;
        };
        match &self.backend {
            Backend::Provider(provider) => {
                if let Err(e) = provider.delete(path).await {
                    warn!(path = %path, error = %e, "Failed to remove stored image");
                }
            }
            Backend::Inline => {
                warn!(path = %path, "Image store is inline; leaving path reference in place");
            }
        }
    }
}

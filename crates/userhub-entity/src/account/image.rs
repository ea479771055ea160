//! Profile image reference.

/// Where an account's profile image lives.
///
/// The variant is decided by deployment configuration, never per request.
#[derive(Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// Image bytes stored on the account record.
    Inline(Vec<u8>),
    /// Path of externally stored content, relative to the storage root.
    Path(String),
}

impl ImageRef {
    /// Returns the storage path for file-backed images.
    pub fn as_path(&self) -> Option<&str> {
        match self {
            Self::Path(p) => Some(p),
            Self::Inline(_) => None,
        }
    }

    /// Returns the raw bytes for inline images.
    pub fn as_inline(&self) -> Option<&[u8]> {
        match self {
            Self::Inline(bytes) => Some(bytes),
            Self::Path(_) => None,
        }
    }
}

impl std::fmt::Debug for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inline(bytes) => write!(f, "Inline({} bytes)", bytes.len()),
            Self::Path(p) => f.debug_tuple("Path").field(p).finish(),
        }
    }
}

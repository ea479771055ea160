//! Canonical account submission produced by request ingestion.

use std::fmt;

use bytes::Bytes;

use userhub_core::types::Patch;

/// Account fields as submitted by a client, independent of wire encoding.
///
/// Every field is a [`Patch`]: absent or empty input is `Unchanged`, an
/// explicit clear flag is `Clear`. At registration `Unchanged` means "not
/// supplied".
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AccountSubmission {
    pub username: Patch<String>,
    pub password: Patch<String>,
    pub role: Patch<String>,
    pub region: Patch<String>,
    /// Raw, not yet validated image bytes.
    pub image: Patch<Bytes>,
}

impl AccountSubmission {
    /// Returns `true` when no field is set or cleared.
    pub fn is_empty(&self) -> bool {
        self.username.is_unchanged()
            && self.password.is_unchanged()
            && self.role.is_unchanged()
            && self.region.is_unchanged()
            && self.image.is_unchanged()
    }
}

impl fmt::Debug for AccountSubmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = match self.password {
            Patch::Unchanged => "unchanged",
            Patch::Set(_) => "<redacted>",
            Patch::Clear => "clear",
        };
        let image = self.image.as_set().map(Bytes::len);
        f.debug_struct("AccountSubmission")
            .field("username", &self.username)
            .field("password", &password)
            .field("role", &self.role)
            .field("region", &self.region)
            .field("image_bytes", &image)
            .finish()
    }
}

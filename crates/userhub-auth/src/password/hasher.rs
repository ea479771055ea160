//! Argon2id password hashing and verification.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use userhub_core::config::Argon2Config;
use userhub_core::error::AppError;

/// Password hashing as seen by the account service.
pub trait CredentialHasher: Send + Sync + std::fmt::Debug + 'static {
    /// Hashes `password` with a fresh salt.
    fn hash_password(&self, password: &str) -> Result<String, AppError>;

    /// Checks `password` against a stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError>;

    /// A valid hash matching no real password, produced with the current
    /// cost parameters. Verifying against it costs the same as a real check.
    fn dummy_hash(&self) -> &str;
}

/// Handles password hashing and verification using Argon2id.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
    dummy_hash: String,
}

impl PasswordHasher {
    /// Creates a hasher with the configured cost parameters.
    ///
    /// Computes one throwaway hash up front for [`CredentialHasher::dummy_hash`].
    pub fn new(config: &Argon2Config) -> Result<Self, AppError> {
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
            .map_err(|e| AppError::configuration(format!("Invalid Argon2 parameters: {e}")))?;
        let mut hasher = Self {
            params,
            dummy_hash: String::new(),
        };
        hasher.dummy_hash = hasher.hash_password("userhub-unknown-account")?;
        Ok(hasher)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes a plaintext password using Argon2id with a fresh random salt.
    ///
    /// Two calls with the same input produce different PHC strings.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored Argon2id hash.
    ///
    /// Cost parameters and salt are taken from the stored hash. Returns
    /// `Ok(false)` on mismatch; an unparseable hash is an internal error.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;

        match self.argon2().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }
}

impl CredentialHasher for PasswordHasher {
    fn hash_password(&self, password: &str) -> Result<String, AppError> {
        PasswordHasher::hash_password(self, password)
    }

    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        PasswordHasher::verify_password(self, password, hash)
    }

    fn dummy_hash(&self) -> &str {
        &self.dummy_hash
    }
}

#[cfg(test)]
mod tests {
    use userhub_core::error::ErrorKind;

    use super::*;

    fn cheap() -> PasswordHasher {
        PasswordHasher::new(&Argon2Config {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = cheap();
        let hash = hasher.hash_password("pw123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password("pw123", &hash).unwrap());
        assert!(!hasher.verify_password("pw124", &hash).unwrap());
    }

    #[test]
    fn test_salt_differs_per_call() {
        let hasher = cheap();
        let a = hasher.hash_password("same").unwrap();
        let b = hasher.hash_password("same").unwrap();
        assert_ne!(a, b);
        assert!(hasher.verify_password("same", &a).unwrap());
        assert!(hasher.verify_password("same", &b).unwrap());
    }

    #[test]
    fn test_verify_uses_params_from_hash() {
        let hash = cheap().hash_password("pw").unwrap();
        let other = PasswordHasher::new(&Argon2Config {
            memory_kib: 16,
            iterations: 2,
            parallelism: 1,
        })
        .unwrap();
        assert!(other.verify_password("pw", &hash).unwrap());
    }

    #[test]
    fn test_dummy_hash_is_verifiable() {
        let hasher = cheap();
        let dummy = CredentialHasher::dummy_hash(&hasher);
        assert!(dummy.starts_with("$argon2id$v=19$m=8,t=1,p=1$"));
        assert!(!hasher.verify_password("pw123", dummy).unwrap());
        assert!(!hasher.verify_password("", dummy).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_internal() {
        let err = cheap().verify_password("pw", "not-a-hash").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Internal);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let err = PasswordHasher::new(&Argon2Config {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
        })
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}

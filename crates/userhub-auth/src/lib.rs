//! # userhub-auth
//!
//! Authentication and authorization primitives for UserHub.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and verification
//! - `jwt`: bearer token issuance and validation
//! - `rbac`: role sets used by route gates

pub mod jwt;
pub mod password;
pub mod rbac;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenError};
pub use password::{CredentialHasher, PasswordHasher};
pub use rbac::RoleSet;

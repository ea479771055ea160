//! Password hashing.

pub mod hasher;

pub use hasher::{CredentialHasher, PasswordHasher};

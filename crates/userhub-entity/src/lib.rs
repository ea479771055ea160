//! # userhub-entity
//!
//! Domain entity models for UserHub. The account record, its role, and the
//! profile image reference live here; persistence row mappings live in
//! `userhub-database`.

pub mod account;

//! Role-based access control.

pub mod role_set;

pub use role_set::RoleSet;

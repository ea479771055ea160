//! Account domain entities.

pub mod image;
pub mod model;
pub mod role;

pub use image::ImageRef;
pub use model::{Account, AccountChanges, NewAccount};
pub use role::Role;

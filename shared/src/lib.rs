//! Gym Groups Shared Library
//!
//! Domain models, API types, and validation shared by the backend and its
//! tests.

pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::{ActivityStatus, Group, GroupMembership, User};
pub use types::*;

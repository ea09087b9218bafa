//! Storage abstraction traits
//!
//! The transaction service only needs to know whether a username exists, not
//! how users are stored. This trait is that seam.

use crate::error::FintrackError;

/// Capability to check whether a username is registered
pub trait UserLookup: Send + Sync {
    /// True iff a user with exactly this username exists
    fn username_exists(&self, username: &str) -> Result<bool, FintrackError>;
}

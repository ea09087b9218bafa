//! Core data models for fintrack
//!
//! Users with validated credentials and the financial transactions that
//! reference them by username.

pub mod ids;
pub mod transaction;
pub mod user;

pub use ids::{IdSequence, TransactionId};
pub use transaction::{Transaction, TransactionKind, TransactionValidationError};
pub use user::{User, UserValidationError};

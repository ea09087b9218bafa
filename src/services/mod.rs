//! Service layer for fintrack
//!
//! Business rules (username uniqueness, owner existence) on top of the
//! storage layer. Field-level rules live in the models.

pub mod transaction;
pub mod user;

pub use transaction::{TransactionService, UserSummary};
pub use user::UserService;

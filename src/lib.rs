//! fintrack - in-memory user accounts and personal transaction tracking
//!
//! Users carry validated credentials; transactions (income, expense,
//! investment) reference their owner by username. Everything lives in memory.
//!
//! # Architecture
//!
//! - `config`: Settings and path management
//! - `error`: Custom error types
//! - `models`: Users, transactions and transaction ids
//! - `storage`: In-memory repositories
//! - `services`: Business rules over the storage layer
//! - `audit`: Record of every mutation
//! - `display`: Terminal formatting
//! - `export`: JSON snapshot of the stores
//! - `cli`: Handlers behind the `fintrack` binary
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use fintrack::services::{TransactionService, UserService};
//! use fintrack::storage::Storage;
//!
//! let storage = Storage::new();
//! let users = UserService::new(&storage);
//! let transactions = TransactionService::new(&storage);
//!
//! users
//!     .create_user("alice", "Password123@", "alice@example.com", "Alice", "Smith")?
//!     .expect("username is free");
//! let date = NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date");
//! transactions.add_transaction("alice", "income", 100.0, date, "Salary")?;
//!
//! assert_eq!(transactions.get_total_amount_by_type("alice", "income")?, 100.0);
//! # Ok::<(), fintrack::FintrackError>(())
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{FintrackError, FintrackResult};

//! JSON export
//!
//! Snapshot of all users and transactions with schema versioning. Passwords
//! are never written.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::FintrackResult;
use crate::models::{Transaction, User};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full snapshot of the in-memory stores
#[derive(Debug, Clone, Serialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub users: Vec<User>,
    pub transactions: Vec<Transaction>,
    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    pub user_count: usize,
    pub transaction_count: usize,

    /// Transactions whose owner has since been deleted
    pub orphaned_transaction_count: usize,

    pub earliest_transaction: Option<String>,
    pub latest_transaction: Option<String>,
}

impl FullExport {
    /// Build a snapshot from storage
    pub fn from_storage(storage: &Storage) -> FintrackResult<Self> {
        let users = storage.users.get_all()?;
        let transactions = storage.transactions.get_all()?;

        let usernames: HashSet<&str> = users.iter().map(User::username).collect();
        let orphaned_transaction_count = transactions
            .iter()
            .filter(|t| !usernames.contains(t.username()))
            .count();

        let earliest_transaction = transactions.iter().map(|t| t.date()).min().map(|d| d.to_string());
        let latest_transaction = transactions.iter().map(|t| t.date()).max().map(|d| d.to_string());

        let metadata = ExportMetadata {
            user_count: users.len(),
            transaction_count: transactions.len(),
            orphaned_transaction_count,
            earliest_transaction,
            latest_transaction,
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            users,
            transactions,
            metadata,
        })
    }
}

/// Write the full snapshot as JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> FintrackResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)?;
    } else {
        serde_json::to_writer(writer, &export)?;
    }

    Ok(())
}

//! Storage layer for fintrack
//!
//! In-memory repositories, one per entity type, each guarding its collection
//! with its own lock. `Storage` ties them together with the audit log.

pub mod traits;
pub mod transactions;
pub mod users;

pub use traits::UserLookup;
pub use transactions::TransactionRepository;
pub use users::UserRepository;

use tracing::warn;

use crate::audit::{AuditEntry, AuditLog};

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    pub users: UserRepository,
    pub transactions: TransactionRepository,
    audit: AuditLog,
    audit_enabled: bool,
}

impl Storage {
    /// Create empty storage with auditing enabled
    pub fn new() -> Self {
        Self::with_audit(true)
    }

    /// Create empty storage, choosing whether mutations are audited
    pub fn with_audit(audit_enabled: bool) -> Self {
        Self {
            users: UserRepository::new(),
            transactions: TransactionRepository::new(),
            audit: AuditLog::new(),
            audit_enabled,
        }
    }

    /// The audit log
    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    pub fn is_audit_enabled(&self) -> bool {
        self.audit_enabled
    }

    /// Record a mutation that has already been committed
    ///
    /// The entry is only built when auditing is enabled. A failure to record
    /// is logged and does not undo or fail the mutation.
    pub fn record(&self, entry: impl FnOnce() -> AuditEntry) {
        if !self.audit_enabled {
            return;
        }
        let entry = entry();
        let subject = entry.subject.clone();
        if let Err(e) = self.audit.log(entry) {
            warn!("Audit entry for {} not recorded: {}", subject, e);
        }
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

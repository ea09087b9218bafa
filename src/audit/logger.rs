//! In-memory append-only audit log

use std::sync::RwLock;

use crate::error::{FintrackError, FintrackResult};

use super::entry::{AuditEntry, AuditSubject};

/// Append-only list of audit entries, oldest first
#[derive(Default)]
pub struct AuditLog {
    entries: RwLock<Vec<AuditEntry>>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry
    pub fn log(&self, entry: AuditEntry) -> FintrackResult<()> {
        let mut entries = self.entries.write().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire audit write lock: {}", e))
        })?;
        entries.push(entry);
        Ok(())
    }

    /// All entries in chronological order
    pub fn read_all(&self) -> FintrackResult<Vec<AuditEntry>> {
        let entries = self.entries.read().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire audit read lock: {}", e))
        })?;
        Ok(entries.clone())
    }

    /// Entries about one user or transaction, oldest first
    pub fn history(&self, subject: &AuditSubject) -> FintrackResult<Vec<AuditEntry>> {
        let entries = self.entries.read().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire audit read lock: {}", e))
        })?;
        Ok(entries.iter().filter(|e| e.is_about(subject)).cloned().collect())
    }

    pub fn entry_count(&self) -> FintrackResult<usize> {
        let entries = self.entries.read().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire audit read lock: {}", e))
        })?;
        Ok(entries.len())
    }

    /// Poison the lock by panicking while holding it
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        std::thread::scope(|s| {
            let _ = s
                .spawn(|| {
                    let _guard = self.entries.write();
                    panic!("audit log poisoned on purpose");
                })
                .join();
        });
    }
}

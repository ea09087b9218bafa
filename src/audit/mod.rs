//! Audit trail for fintrack
//!
//! Every create, update and delete the services perform is recorded against
//! the user or transaction it touched.
//!
//! - `AuditEntry`: a single recorded mutation.
//! - `AuditSubject`: a user (by username) or a transaction (by id).
//! - `AuditLog`: the in-memory, append-only list of entries.

mod diff;
mod entry;
mod logger;

pub use entry::{Action, AuditEntry, AuditSubject};
pub use logger::AuditLog;

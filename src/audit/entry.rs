//! Audit entries
//!
//! An entry names what was touched (a user by username, a transaction by id),
//! what happened to it, and the field-level changes for updates.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::diff::field_changes;
use crate::models::TransactionId;

/// The record an audit entry is about
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum AuditSubject {
    User(String),
    Transaction(TransactionId),
}

impl AuditSubject {
    pub fn user(username: impl Into<String>) -> Self {
        Self::User(username.into())
    }
}

impl fmt::Display for AuditSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(username) => write!(f, "user {}", username),
            Self::Transaction(id) => write!(f, "transaction {}", id),
        }
    }
}

/// What happened to the subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Created,
    Updated,
    Deleted,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Updated => write!(f, "updated"),
            Self::Deleted => write!(f, "deleted"),
        }
    }
}

/// One recorded mutation
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    pub at: DateTime<Utc>,
    pub action: Action,
    pub subject: AuditSubject,

    /// Serialized state after a create or update, before a delete.
    /// Fields skipped by `Serialize` (the password) never appear.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<Value>,

    /// `field: old -> new` lines, plus notes for redacted fields
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<String>,
}

impl AuditEntry {
    fn new(action: Action, subject: AuditSubject, snapshot: Option<Value>) -> Self {
        Self {
            at: Utc::now(),
            action,
            subject,
            snapshot,
            changes: Vec::new(),
        }
    }

    pub fn created<T: Serialize>(subject: AuditSubject, record: &T) -> Self {
        Self::new(Action::Created, subject, serde_json::to_value(record).ok())
    }

    /// An update, with the changes between the two serialized states
    pub fn updated<T: Serialize>(subject: AuditSubject, before: &T, after: &T) -> Self {
        let after = serde_json::to_value(after).ok();
        let changes = match (serde_json::to_value(before).ok(), after.as_ref()) {
            (Some(before), Some(after)) => field_changes(&before, after),
            _ => Vec::new(),
        };

        Self {
            changes,
            ..Self::new(Action::Updated, subject, after)
        }
    }

    pub fn deleted<T: Serialize>(subject: AuditSubject, record: &T) -> Self {
        Self::new(Action::Deleted, subject, serde_json::to_value(record).ok())
    }

    /// Note a change the snapshots cannot show, e.g. a new password
    pub fn with_redacted_change(mut self, field: &str) -> Self {
        self.changes.push(format!("{}: changed", field));
        self
    }

    pub fn is_about(&self, subject: &AuditSubject) -> bool {
        &self.subject == subject
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.at.format("%Y-%m-%d %H:%M:%S"),
            self.subject,
            self.action
        )?;
        if !self.changes.is_empty() {
            write!(f, ": {}", self.changes.join("; "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_subject_display() {
        assert_eq!(AuditSubject::user("alice").to_string(), "user alice");
        assert_eq!(
            AuditSubject::Transaction(TransactionId::from_raw(4)).to_string(),
            "transaction txn-4"
        );
    }

    #[test]
    fn test_created_and_deleted_keep_snapshot() {
        let record = json!({"username": "alice"});

        let created = AuditEntry::created(AuditSubject::user("alice"), &record);
        assert_eq!(created.action, Action::Created);
        assert_eq!(created.snapshot, Some(record.clone()));
        assert!(created.changes.is_empty());

        let deleted = AuditEntry::deleted(AuditSubject::user("alice"), &record);
        assert_eq!(deleted.action, Action::Deleted);
        assert_eq!(deleted.snapshot, Some(record));
    }

    #[test]
    fn test_updated_lists_changes() {
        let entry = AuditEntry::updated(
            AuditSubject::user("alice"),
            &json!({"email": "a@x.com", "first_name": "Al"}),
            &json!({"email": "b@x.com", "first_name": "Al"}),
        )
        .with_redacted_change("password");

        assert_eq!(
            entry.changes,
            vec![
                "email: \"a@x.com\" -> \"b@x.com\"".to_string(),
                "password: changed".to_string()
            ]
        );
        assert!(entry
            .to_string()
            .ends_with("user alice updated: email: \"a@x.com\" -> \"b@x.com\"; password: changed"));
    }

    #[test]
    fn test_is_about() {
        let id = TransactionId::from_raw(2);
        let entry = AuditEntry::deleted(AuditSubject::Transaction(id), &json!({}));
        assert!(entry.is_about(&AuditSubject::Transaction(id)));
        assert!(!entry.is_about(&AuditSubject::Transaction(TransactionId::from_raw(3))));
        assert!(!entry.is_about(&AuditSubject::user("txn-2")));
    }

    #[test]
    fn test_serialization() {
        let entry = AuditEntry::created(
            AuditSubject::Transaction(TransactionId::from_raw(1)),
            &json!({"amount": 1.0}),
        );
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["action"], "created");
        assert_eq!(json["subject"], json!({"type": "transaction", "value": 1}));
        assert!(json.get("changes").is_none());
    }
}

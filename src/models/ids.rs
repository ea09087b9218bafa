//! Transaction identifiers and the sequence that hands them out
//!
//! Ids are plain sequential integers. Each repository owns its own
//! `IdSequence`, so two independent stores never share a counter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(u64);

impl TransactionId {
    /// Wrap a raw id value
    pub fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Get the underlying integer
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "txn-{}", self.0)
    }
}

/// Monotonically increasing id generator starting at 1
#[derive(Debug, Clone)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    /// Create a sequence whose first id is 1
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// The id the next call to `next_id` will return
    pub fn peek(&self) -> TransactionId {
        TransactionId(self.next)
    }

    /// Hand out the current id and advance
    pub fn next_id(&mut self) -> TransactionId {
        let id = TransactionId(self.next);
        self.next += 1;
        id
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

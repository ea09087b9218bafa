//! In-memory transaction repository
//!
//! Keeps transactions in insertion order together with the id sequence that
//! numbers them. Both live behind one lock so an id is only consumed by a
//! transaction that actually gets stored.

use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::FintrackError;
use crate::models::{IdSequence, Transaction, TransactionId};

#[derive(Default)]
struct Ledger {
    transactions: Vec<Transaction>,
    sequence: IdSequence,
}

/// Repository holding every transaction
#[derive(Default)]
pub struct TransactionRepository {
    data: RwLock<Ledger>,
}

impl TransactionRepository {
    /// Create an empty repository whose first id will be 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate, number and append a new transaction
    pub fn insert(
        &self,
        username: &str,
        transaction_type: &str,
        amount: f64,
        date: NaiveDate,
        description: &str,
    ) -> Result<Transaction, FintrackError> {
        let mut data = self.data.write().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let txn = Transaction::new(
            data.sequence.peek(),
            username,
            transaction_type,
            amount,
            date,
            description,
        )?;
        data.sequence.next_id();
        data.transactions.push(txn.clone());

        Ok(txn)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, FintrackError> {
        let data = self.data.read().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.transactions.iter().find(|t| t.id() == id).cloned())
    }

    /// Get all transactions in insertion order
    pub fn get_all(&self) -> Result<Vec<Transaction>, FintrackError> {
        let data = self.data.read().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.transactions.clone())
    }

    /// Get a user's transactions in insertion order
    pub fn get_by_user(&self, username: &str) -> Result<Vec<Transaction>, FintrackError> {
        let data = self.data.read().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data
            .transactions
            .iter()
            .filter(|t| t.username() == username)
            .cloned()
            .collect())
    }

    /// Remove the transaction with this id; false if there is none
    pub fn remove(&self, id: TransactionId) -> Result<bool, FintrackError> {
        let mut data = self.data.write().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        match data.transactions.iter().position(|t| t.id() == id) {
            Some(index) => {
                data.transactions.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Count transactions
    pub fn count(&self) -> Result<usize, FintrackError> {
        let data = self.data.read().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.transactions.len())
    }
}

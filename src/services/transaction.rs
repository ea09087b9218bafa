//! Transaction service
//!
//! Adds, lists, deletes and totals transactions. Every operation that names a
//! user first checks, through a `UserLookup`, that the user exists and fails
//! with `NotFound` otherwise.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::audit::{AuditEntry, AuditSubject};
use crate::error::{FintrackError, FintrackResult};
use crate::models::{Transaction, TransactionId, TransactionKind};
use crate::storage::{Storage, UserLookup};

/// Per-kind totals for one user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSummary {
    pub username: String,
    pub income: f64,
    pub expense: f64,
    pub investment: f64,
    pub transaction_count: usize,
}

impl UserSummary {
    /// Income minus expenses and investments
    pub fn net(&self) -> f64 {
        self.income - self.expense - self.investment
    }
}

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
    users: &'a dyn UserLookup,
}

impl<'a> TransactionService<'a> {
    /// Create a transaction service that checks users against the storage's
    /// own user repository
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            users: &storage.users,
        }
    }

    /// Create a transaction service with a different source of usernames
    pub fn with_lookup(storage: &'a Storage, users: &'a dyn UserLookup) -> Self {
        Self { storage, users }
    }

    fn ensure_user_exists(&self, username: &str) -> FintrackResult<()> {
        if !self.users.username_exists(username)? {
            warn!("Username '{}' does not exist.", username);
            return Err(FintrackError::user_not_found(username));
        }
        Ok(())
    }

    /// Record a new transaction for an existing user
    pub fn add_transaction(
        &self,
        username: &str,
        transaction_type: &str,
        amount: f64,
        date: NaiveDate,
        description: &str,
    ) -> FintrackResult<Transaction> {
        self.ensure_user_exists(username)?;

        let txn = self
            .storage
            .transactions
            .insert(username, transaction_type, amount, date, description)?;

        self.storage
            .record(|| AuditEntry::created(AuditSubject::Transaction(txn.id()), &txn));

        info!(
            "Transaction {} added for {}: {} {:.2}",
            txn.id(),
            username,
            txn.transaction_type(),
            txn.amount()
        );
        Ok(txn)
    }

    /// All of a user's transactions, in the order they were added
    pub fn get_transactions_by_user(&self, username: &str) -> FintrackResult<Vec<Transaction>> {
        self.ensure_user_exists(username)?;
        self.storage.transactions.get_by_user(username)
    }

    /// Get a single transaction by id
    pub fn get_transaction(&self, id: TransactionId) -> FintrackResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Delete a transaction by id; false if no such transaction exists
    ///
    /// Works whether or not the owning user still exists.
    pub fn delete_transaction(&self, id: TransactionId) -> FintrackResult<bool> {
        let Some(txn) = self.storage.transactions.get(id)? else {
            debug!("Transaction {} not found", id);
            return Ok(false);
        };

        if !self.storage.transactions.remove(id)? {
            return Ok(false);
        }

        self.storage
            .record(|| AuditEntry::deleted(AuditSubject::Transaction(id), &txn));

        info!("Transaction {} deleted", id);
        Ok(true)
    }

    /// Sum of amounts of a user's transactions whose type equals
    /// `transaction_type` exactly (case-sensitive)
    ///
    /// 0.0 when nothing matches; `NotFound` when the user does not exist.
    pub fn get_total_amount_by_type(
        &self,
        username: &str,
        transaction_type: &str,
    ) -> FintrackResult<f64> {
        let total: f64 = self
            .get_transactions_by_user(username)?
            .iter()
            .filter(|t| t.transaction_type() == transaction_type)
            .map(Transaction::amount)
            .sum();
        Ok(total)
    }

    /// Totals per kind for a user, matching types case-insensitively
    pub fn summarize(&self, username: &str) -> FintrackResult<UserSummary> {
        let transactions = self.get_transactions_by_user(username)?;

        let total_for = |kind: TransactionKind| -> f64 {
            transactions
                .iter()
                .filter(|t| t.kind() == kind)
                .map(Transaction::amount)
                .sum()
        };

        Ok(UserSummary {
            username: username.to_string(),
            income: total_for(TransactionKind::Income),
            expense: total_for(TransactionKind::Expense),
            investment: total_for(TransactionKind::Investment),
            transaction_count: transactions.len(),
        })
    }

    /// Count all transactions, regardless of owner
    pub fn count(&self) -> FintrackResult<usize> {
        self.storage.transactions.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Action;
    use crate::services::UserService;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn create_test_storage(usernames: &[&str]) -> Storage {
        let storage = Storage::new();
        let users = UserService::new(&storage);
        for name in usernames {
            users
                .create_user(
                    name,
                    "Password123@",
                    &format!("{}@example.com", name),
                    "Test",
                    "User",
                )
                .unwrap()
                .unwrap();
        }
        storage
    }

    #[test]
    fn test_add_transaction() {
        let storage = create_test_storage(&["alice"]);
        let service = TransactionService::new(&storage);

        let txn = service
            .add_transaction("alice", "income", 100.0, date(1), "Salary")
            .unwrap();
        assert_eq!(txn.id().value(), 1);
        assert_eq!(txn.username(), "alice");
        assert_eq!(service.count().unwrap(), 1);
    }

    #[test]
    fn test_add_for_unknown_user() {
        let storage = create_test_storage(&[]);
        let service = TransactionService::new(&storage);

        let err = service
            .add_transaction("ghost", "income", 10.0, date(1), "")
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_add_invalid_transaction() {
        let storage = create_test_storage(&["alice"]);
        let service = TransactionService::new(&storage);

        let err = service
            .add_transaction("alice", "donation", 10.0, date(1), "")
            .unwrap_err();
        assert!(err.is_validation());

        let err = service
            .add_transaction("alice", "expense", -50.0, date(1), "")
            .unwrap_err();
        assert!(err.is_validation());

        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_totals_by_type() {
        let storage = create_test_storage(&["alice"]);
        let service = TransactionService::new(&storage);

        service.add_transaction("alice", "income", 100.0, date(1), "").unwrap();
        service.add_transaction("alice", "income", 50.0, date(2), "").unwrap();
        service.add_transaction("alice", "expense", 30.0, date(3), "").unwrap();

        assert_eq!(service.get_total_amount_by_type("alice", "income").unwrap(), 150.0);
        assert_eq!(service.get_total_amount_by_type("alice", "expense").unwrap(), 30.0);
        assert_eq!(service.get_total_amount_by_type("alice", "investment").unwrap(), 0.0);
    }

    #[test]
    fn test_total_matches_type_exactly() {
        let storage = create_test_storage(&["alice"]);
        let service = TransactionService::new(&storage);

        service.add_transaction("alice", "Income", 40.0, date(1), "").unwrap();
        service.add_transaction("alice", "income", 2.0, date(1), "").unwrap();

        assert_eq!(service.get_total_amount_by_type("alice", "income").unwrap(), 2.0);
        assert_eq!(service.get_total_amount_by_type("alice", "Income").unwrap(), 40.0);
        assert_eq!(service.summarize("alice").unwrap().income, 42.0);
    }

    #[test]
    fn test_total_for_unknown_user() {
        let storage = create_test_storage(&[]);
        let service = TransactionService::new(&storage);

        let err = service.get_total_amount_by_type("ghost", "income").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_transactions_by_user() {
        let storage = create_test_storage(&["alice", "bob"]);
        let service = TransactionService::new(&storage);

        service.add_transaction("alice", "income", 1.0, date(5), "a1").unwrap();
        service.add_transaction("bob", "income", 2.0, date(1), "b1").unwrap();
        service.add_transaction("alice", "expense", 3.0, date(1), "a2").unwrap();

        let alice: Vec<_> = service
            .get_transactions_by_user("alice")
            .unwrap()
            .iter()
            .map(|t| t.description().to_string())
            .collect();
        assert_eq!(alice, vec!["a1", "a2"]);

        assert!(service.get_transactions_by_user("carol").unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_transaction() {
        let storage = create_test_storage(&["alice"]);
        let service = TransactionService::new(&storage);

        let keep = service.add_transaction("alice", "income", 1.0, date(1), "keep").unwrap();
        let gone = service.add_transaction("alice", "income", 2.0, date(1), "gone").unwrap();

        assert!(service.delete_transaction(gone.id()).unwrap());
        let remaining = service.get_transactions_by_user("alice").unwrap();
        assert_eq!(remaining, vec![keep]);

        assert!(!service.delete_transaction(gone.id()).unwrap());
        assert!(!service.delete_transaction(TransactionId::from_raw(999)).unwrap());
    }

    #[test]
    fn test_ids_strictly_increase_and_never_reuse() {
        let storage = create_test_storage(&["alice"]);
        let service = TransactionService::new(&storage);

        let mut last = 0;
        for i in 0..5 {
            let txn = service
                .add_transaction("alice", "expense", i as f64, date(1), "")
                .unwrap();
            assert!(txn.id().value() > last);
            last = txn.id().value();
            service.delete_transaction(txn.id()).unwrap();
        }
        assert_eq!(last, 5);
    }

    #[test]
    fn test_separate_storages_have_separate_counters() {
        let first = create_test_storage(&["alice"]);
        let second = create_test_storage(&["alice"]);

        let a = TransactionService::new(&first)
            .add_transaction("alice", "income", 1.0, date(1), "")
            .unwrap();
        let b = TransactionService::new(&second)
            .add_transaction("alice", "income", 1.0, date(1), "")
            .unwrap();
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn test_summarize() {
        let storage = create_test_storage(&["alice"]);
        let service = TransactionService::new(&storage);

        service.add_transaction("alice", "income", 500.0, date(1), "").unwrap();
        service.add_transaction("alice", "EXPENSE", 120.0, date(2), "").unwrap();
        service.add_transaction("alice", "investment", 80.0, date(3), "").unwrap();

        let summary = service.summarize("alice").unwrap();
        assert_eq!(summary.income, 500.0);
        assert_eq!(summary.expense, 120.0);
        assert_eq!(summary.investment, 80.0);
        assert_eq!(summary.transaction_count, 3);
        assert_eq!(summary.net(), 300.0);
    }

    #[test]
    fn test_custom_lookup() {
        struct Everyone;
        impl UserLookup for Everyone {
            fn username_exists(&self, _username: &str) -> FintrackResult<bool> {
                Ok(true)
            }
        }

        let storage = Storage::new();
        let lookup = Everyone;
        let service = TransactionService::with_lookup(&storage, &lookup);

        let txn = service
            .add_transaction("anyone", "income", 5.0, date(1), "")
            .unwrap();
        assert_eq!(service.get_transaction(txn.id()).unwrap(), Some(txn));
    }

    #[test]
    fn test_deleting_user_does_not_cascade() {
        let storage = create_test_storage(&["bob"]);
        let users = UserService::new(&storage);
        let service = TransactionService::new(&storage);

        let income = service.add_transaction("bob", "income", 100.0, date(1), "").unwrap();
        let expense = service.add_transaction("bob", "expense", 40.0, date(2), "").unwrap();
        assert_eq!(service.get_total_amount_by_type("bob", "income").unwrap(), 100.0);
        assert_eq!(service.get_total_amount_by_type("bob", "expense").unwrap(), 40.0);

        assert!(users.delete_user("bob").unwrap());

        assert!(service.get_transactions_by_user("bob").unwrap_err().is_not_found());
        assert_eq!(service.count().unwrap(), 2);
        assert!(service.delete_transaction(income.id()).unwrap());
        assert!(service.delete_transaction(expense.id()).unwrap());
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_transaction_history() {
        let storage = create_test_storage(&["alice"]);
        let service = TransactionService::new(&storage);

        let txn = service.add_transaction("alice", "income", 7.5, date(1), "Tips").unwrap();
        service.add_transaction("alice", "expense", 1.0, date(1), "").unwrap();
        service.delete_transaction(txn.id()).unwrap();

        let history = storage
            .audit()
            .history(&AuditSubject::Transaction(txn.id()))
            .unwrap();
        let actions: Vec<_> = history.iter().map(|e| e.action).collect();
        assert_eq!(actions, vec![Action::Created, Action::Deleted]);
        assert_eq!(
            history[1].snapshot.as_ref().unwrap()["description"],
            "Tips"
        );
    }
}

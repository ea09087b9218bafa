//! Transaction model
//!
//! A financial record owned by a user (referenced by username). Type and
//! amount are validated at construction and on every later change.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::TransactionId;
use crate::error::FintrackError;

/// Recognized kinds of transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
    Investment,
}

impl TransactionKind {
    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Investment => "investment",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = TransactionValidationError;

    /// Case-insensitive parse
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "investment" => Ok(Self::Investment),
            _ => Err(TransactionValidationError::InvalidType(s.to_string())),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    id: TransactionId,

    /// Owner; a weak reference, the user may no longer exist
    username: String,

    /// Type as given by the caller (casing preserved)
    transaction_type: String,

    #[serde(skip)]
    kind: TransactionKind,

    amount: f64,

    date: NaiveDate,

    description: String,

    created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a transaction with an id handed out by the owning store
    pub fn new(
        id: TransactionId,
        username: impl Into<String>,
        transaction_type: impl Into<String>,
        amount: f64,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Result<Self, TransactionValidationError> {
        let transaction_type = transaction_type.into();
        let kind = transaction_type.parse()?;
        validate_amount(amount)?;

        Ok(Self {
            id,
            username: username.into(),
            transaction_type,
            kind,
            amount,
            date,
            description: description.into(),
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn transaction_type(&self) -> &str {
        &self.transaction_type
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The recognized kind behind `transaction_type`
    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn is_income(&self) -> bool {
        self.kind() == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind() == TransactionKind::Expense
    }

    pub fn is_investment(&self) -> bool {
        self.kind() == TransactionKind::Investment
    }

    /// Change the type, subject to the same check as construction
    pub fn set_transaction_type(
        &mut self,
        transaction_type: impl Into<String>,
    ) -> Result<(), TransactionValidationError> {
        let transaction_type = transaction_type.into();
        self.kind = transaction_type.parse()?;
        self.transaction_type = transaction_type;
        Ok(())
    }

    /// Change the amount, subject to the same check as construction
    pub fn set_amount(&mut self, amount: f64) -> Result<(), TransactionValidationError> {
        validate_amount(amount)?;
        self.amount = amount;
        Ok(())
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {:.2} ({})",
            self.id,
            self.date.format("%Y-%m-%d"),
            self.transaction_type,
            self.amount,
            self.username
        )
    }
}

fn validate_amount(amount: f64) -> Result<(), TransactionValidationError> {
    if amount.is_nan() || amount < 0.0 {
        return Err(TransactionValidationError::NegativeAmount(amount));
    }
    Ok(())
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionValidationError {
    InvalidType(String),
    NegativeAmount(f64),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidType(t) => write!(f, "Invalid transaction type: {}", t),
            Self::NegativeAmount(amount) => {
                write!(f, "Amount must be a positive number, got {}", amount)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}

impl From<TransactionValidationError> for FintrackError {
    fn from(err: TransactionValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

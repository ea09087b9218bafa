//! Transaction display formatting

use crate::config::Settings;
use crate::models::Transaction;
use crate::services::UserSummary;

use super::truncate;

/// Format a single transaction as a register row
pub fn format_transaction_row(txn: &Transaction, settings: &Settings) -> String {
    let description = if txn.description().is_empty() {
        "(no description)"
    } else {
        txn.description()
    };

    format!(
        "{:>8} {:10} {:10} {:24} {:>12}",
        txn.id().to_string(),
        txn.date().format(&settings.date_format).to_string(),
        txn.transaction_type(),
        truncate(description, 24),
        settings.format_amount(txn.amount())
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(transactions: &[Transaction], settings: &Settings) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>8} {:10} {:10} {:24} {:>12}\n",
        "Id", "Date", "Type", "Description", "Amount"
    ));
    output.push_str(&"-".repeat(68));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, settings));
        output.push('\n');
    }

    output
}

/// Format per-kind totals for a user
pub fn format_summary(summary: &UserSummary, settings: &Settings) -> String {
    let mut output = String::new();
    output.push_str(&format!("Summary for {}\n", summary.username));
    output.push_str(&format!("  Income:      {:>12}\n", settings.format_amount(summary.income)));
    output.push_str(&format!("  Expense:     {:>12}\n", settings.format_amount(summary.expense)));
    output.push_str(&format!(
        "  Investment:  {:>12}\n",
        settings.format_amount(summary.investment)
    ));
    output.push_str(&format!("  Net:         {:>12}\n", settings.format_amount(summary.net())));
    output.push_str(&format!("  Transactions: {}\n", summary.transaction_count));
    output
}

//! Scripted end-to-end demonstration
//!
//! Exercises every user and transaction operation against a fresh in-memory
//! store and prints what happened at each step.

use std::io::Write;

use chrono::NaiveDate;

use crate::audit::AuditSubject;
use crate::config::Settings;
use crate::display::{format_summary, format_transaction_register, format_user_details};
use crate::error::{FintrackError, FintrackResult};
use crate::export::export_full_json;
use crate::services::{TransactionService, UserService};
use crate::storage::Storage;

fn date(year: i32, month: u32, day: u32) -> FintrackResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| FintrackError::Validation(format!("Invalid date {}-{}-{}", year, month, day)))
}

/// Run the demonstration, writing a report to `out`
///
/// When `export` is set, a JSON snapshot of the final state is appended.
pub fn run_demo<W: Write>(settings: &Settings, out: &mut W, export: bool) -> FintrackResult<()> {
    let storage = Storage::with_audit(settings.audit_enabled);
    let users = UserService::new(&storage);
    let transactions = TransactionService::new(&storage);

    writeln!(out, "== Users ==")?;
    for (username, password, email, first, last) in [
        ("johndoe", "Password123@", "johndoe@example.com", "John", "Doe"),
        ("janedoe", "Password456@", "janedoe@example.com", "Jane", "Doe"),
        ("johndoe", "AnotherPassword789@", "newemail@example.com", "Johnny", "D"),
    ] {
        match users.create_user(username, password, email, first, last)? {
            Some(user) => writeln!(out, "Created user '{}'", user.username())?,
            None => writeln!(out, "Username '{}' is already taken", username)?,
        }
    }

    match users.create_user("weak", "password", "weak@example.com", "Weak", "Password") {
        Err(e) if e.is_validation() => writeln!(out, "Rejected 'weak': {}", e)?,
        other => {
            other?;
        }
    }

    for username in ["johndoe", "nonexistentuser"] {
        match users.get_user_details(username)? {
            Some(user) => write!(out, "{}", format_user_details(&user))?,
            None => writeln!(out, "User '{}' not found", username)?,
        }
    }

    writeln!(out, "\n== Updates ==")?;
    match users.update_user(
        "janedoe",
        "UpdatedPass456@",
        "updated.email@example.com",
        "Janet",
        "Doe",
    )? {
        Some(user) => writeln!(out, "Updated '{}': {}", user.username(), user.email())?,
        None => writeln!(out, "Update failed: no such user")?,
    }
    match users.update_user("alexsmith", "UpdatedPass456@", "alex@example.com", "Alex", "Smith")? {
        Some(_) => writeln!(out, "Unexpected update of 'alexsmith'")?,
        None => writeln!(out, "Update of 'alexsmith' skipped: no such user")?,
    }
    match users.update_user("janedoe", "passUpdated", "updated.email@example.com", "U", "N") {
        Err(e) if e.is_validation() => writeln!(out, "Rejected update of 'janedoe': {}", e)?,
        other => {
            other?;
        }
    }

    writeln!(out, "\n== Transactions ==")?;
    users.create_user("bob", "B0bPassword!", "bob@example.com", "Bob", "Builder")?;
    let income = transactions.add_transaction("bob", "income", 100.0, date(2025, 1, 1)?, "Salary")?;
    let expense =
        transactions.add_transaction("bob", "expense", 40.0, date(2025, 1, 2)?, "Groceries")?;
    transactions.add_transaction("janedoe", "investment", 250.0, date(2025, 1, 3)?, "Index fund")?;

    for (username, kind, amount) in [("bob", "donation", 10.0), ("bob", "expense", -50.0)] {
        if let Err(e) = transactions.add_transaction(username, kind, amount, date(2025, 1, 4)?, "") {
            writeln!(out, "Rejected {} of {}: {}", kind, amount, e)?;
        }
    }
    if let Err(e) = transactions.add_transaction("ghost", "income", 1.0, date(2025, 1, 4)?, "") {
        writeln!(out, "Rejected transaction for 'ghost': {}", e)?;
    }

    write!(
        out,
        "{}",
        format_transaction_register(&transactions.get_transactions_by_user("bob")?, settings)
    )?;
    writeln!(
        out,
        "bob income total: {}",
        settings.format_amount(transactions.get_total_amount_by_type("bob", "income")?)
    )?;
    writeln!(
        out,
        "bob expense total: {}",
        settings.format_amount(transactions.get_total_amount_by_type("bob", "expense")?)
    )?;
    write!(out, "{}", format_summary(&transactions.summarize("bob")?, settings))?;

    writeln!(out, "\n== Deletes ==")?;
    writeln!(out, "Deleted 'johndoe': {}", users.delete_user("johndoe")?)?;
    writeln!(out, "Deleted 'nonexistentuser': {}", users.delete_user("nonexistentuser")?)?;
    writeln!(out, "Deleted 'bob': {}", users.delete_user("bob")?)?;

    match transactions.get_transactions_by_user("bob") {
        Err(e) if e.is_not_found() => writeln!(out, "Listing bob's transactions: {}", e)?,
        other => {
            other?;
        }
    }
    writeln!(
        out,
        "Deleted {}: {}",
        income.id(),
        transactions.delete_transaction(income.id())?
    )?;
    writeln!(
        out,
        "Deleted {} again: {}",
        income.id(),
        transactions.delete_transaction(income.id())?
    )?;
    writeln!(out, "Transactions still held: {}", transactions.count()?)?;
    writeln!(out, "Expense {} kept after owner deletion", expense.id())?;

    if storage.is_audit_enabled() {
        writeln!(out, "\n== Audit ==")?;
        for entry in storage.audit().read_all()? {
            writeln!(out, "{}", entry)?;
        }

        writeln!(out, "\nHistory of 'janedoe':")?;
        for entry in storage.audit().history(&AuditSubject::user("janedoe"))? {
            writeln!(out, "  {}", entry)?;
        }
    }

    if export {
        writeln!(out, "\n== Export ==")?;
        export_full_json(&storage, out, true)?;
        writeln!(out)?;
    }

    Ok(())
}

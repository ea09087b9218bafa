//! Display formatting for terminal output

pub mod transaction;
pub mod user;

pub use transaction::{format_summary, format_transaction_register, format_transaction_row};
pub use user::format_user_details;

/// Truncate a string to a maximum number of characters, padding short ones
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

//! Credential policy checks

use clap::Subcommand;

use crate::models::User;

/// Validation subcommands
#[derive(Subcommand)]
pub enum CheckCommand {
    /// Check an email address against the accepted pattern
    Email {
        /// Email address to check
        email: String,
    },
    /// Check a password against the password policy
    Password {
        /// Password to check
        password: String,
    },
}

/// Run a check, print `valid` or `invalid`, and return whether it passed
pub fn handle_check_command(cmd: CheckCommand) -> bool {
    let valid = match cmd {
        CheckCommand::Email { email } => User::is_valid_email(&email),
        CheckCommand::Password { password } => User::is_valid_password(&password),
    };
    println!("{}", if valid { "valid" } else { "invalid" });
    valid
}

//! User model
//!
//! A user with identity fields and credentials. Email and password are checked
//! on every assignment, so a `User` value never holds an invalid one.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

use crate::error::FintrackError;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+$").expect("email pattern is a valid regex")
});

/// Minimum number of characters in a password
pub const MIN_PASSWORD_LEN: usize = 8;

/// Symbols of which a password must contain at least one
pub const PASSWORD_SYMBOLS: &str = "@#$%^&+=!";

/// A registered user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    first_name: String,
    last_name: String,
    email: String,
    username: String,

    #[serde(skip_serializing)]
    password: String,

    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user, validating email and password
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let email = email.into();
        let password = password.into();

        if !Self::is_valid_email(&email) {
            return Err(UserValidationError::InvalidEmail);
        }
        if !Self::is_valid_password(&password) {
            return Err(UserValidationError::InvalidPassword);
        }

        let now = Utc::now();
        Ok(Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email,
            username: username.into(),
            password,
            created_at: now,
            updated_at: now,
        })
    }

    /// Check an email address against the accepted pattern
    pub fn is_valid_email(email: &str) -> bool {
        EMAIL_PATTERN.is_match(email)
    }

    /// Check a password against the password policy
    ///
    /// At least `MIN_PASSWORD_LEN` characters, no ASCII whitespace, and at least one
    /// digit, lowercase letter, uppercase letter and one of `PASSWORD_SYMBOLS`.
    pub fn is_valid_password(password: &str) -> bool {
        password.chars().count() >= MIN_PASSWORD_LEN
            && !password.chars().any(is_password_separator)
            && password.chars().any(|c| c.is_ascii_digit())
            && password.chars().any(|c| c.is_ascii_lowercase())
            && password.chars().any(|c| c.is_ascii_uppercase())
            && password.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// First and last name joined by a space
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn set_first_name(&mut self, first_name: impl Into<String>) {
        self.first_name = first_name.into();
        self.updated_at = Utc::now();
    }

    pub fn set_last_name(&mut self, last_name: impl Into<String>) {
        self.last_name = last_name.into();
        self.updated_at = Utc::now();
    }

    /// Replace the username
    ///
    /// Uniqueness is a store-level rule and is not checked here.
    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
        self.updated_at = Utc::now();
    }

    /// Replace the email; the old value is kept if the new one is invalid
    pub fn set_email(&mut self, email: impl Into<String>) -> Result<(), UserValidationError> {
        let email = email.into();
        if !Self::is_valid_email(&email) {
            return Err(UserValidationError::InvalidEmail);
        }
        self.email = email;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Replace the password; the old value is kept if the new one is invalid
    pub fn set_password(&mut self, password: impl Into<String>) -> Result<(), UserValidationError> {
        let password = password.into();
        if !Self::is_valid_password(&password) {
            return Err(UserValidationError::InvalidPassword);
        }
        self.password = password;
        self.updated_at = Utc::now();
        Ok(())
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.username)
    }
}

/// Validation errors for users
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserValidationError {
    InvalidEmail,
    InvalidPassword,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "Invalid email address"),
            Self::InvalidPassword => write!(f, "Invalid password"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// ASCII whitespace (vertical tab included) and line terminators
///
/// Other Unicode spaces such as U+00A0 are ordinary password characters.
fn is_password_separator(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

impl From<UserValidationError> for FintrackError {
    fn from(err: UserValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

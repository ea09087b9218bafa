//! User service
//!
//! Create, read, update and delete users while keeping usernames unique.
//! Absence of the user an operation targets is reported as a value
//! (`Ok(None)` / `Ok(false)`), never as an error.

use tracing::{debug, info, warn};

use crate::audit::{AuditEntry, AuditSubject};
use crate::error::FintrackResult;
use crate::models::User;
use crate::storage::Storage;

/// Service for user management
pub struct UserService<'a> {
    storage: &'a Storage,
}

impl<'a> UserService<'a> {
    /// Create a new user service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a user if the username is free
    ///
    /// Returns `Ok(None)` when the username is already taken; the store is
    /// left untouched. Invalid email or password is a `Validation` error.
    pub fn create_user(
        &self,
        username: &str,
        password: &str,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> FintrackResult<Option<User>> {
        // a taken username wins over invalid credentials
        if self.storage.users.username_exists(username)? {
            warn_taken(username);
            return Ok(None);
        }

        let user = User::new(first_name, last_name, email, username, password)?;

        if !self.storage.users.insert_if_absent(user.clone())? {
            warn_taken(username);
            return Ok(None);
        }

        self.storage
            .record(|| AuditEntry::created(AuditSubject::user(username), &user));

        info!("User created: {}", user.username());
        Ok(Some(user))
    }

    /// Look up a user by username
    pub fn get_user_details(&self, username: &str) -> FintrackResult<Option<User>> {
        let user = self.storage.users.get_user_by_username(username)?;
        if user.is_none() {
            debug!("User '{}' not found", username);
        }
        Ok(user)
    }

    /// Delete a user; returns false if there was no such user
    ///
    /// The user's transactions are left in place.
    pub fn delete_user(&self, username: &str) -> FintrackResult<bool> {
        let Some(user) = self.storage.users.remove_user(username)? else {
            warn!("Username '{}' does not exist. Nothing to delete.", username);
            return Ok(false);
        };

        self.storage
            .record(|| AuditEntry::deleted(AuditSubject::user(username), &user));

        info!("User deleted: {}", username);
        Ok(true)
    }

    /// Update password, email and names of an existing user
    ///
    /// Returns `Ok(None)` when the user does not exist. The username itself is
    /// never changed. If the new password or email is invalid the stored user
    /// is left exactly as it was.
    pub fn update_user(
        &self,
        username: &str,
        password: &str,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> FintrackResult<Option<User>> {
        let updated = self.storage.users.update_with(username, |user| {
            user.set_password(password)?;
            user.set_email(email)?;
            user.set_first_name(first_name);
            user.set_last_name(last_name);
            Ok(())
        })?;

        let Some((before, after)) = updated else {
            warn!("Username '{}' does not exist. Nothing to update.", username);
            return Ok(None);
        };

        self.storage.record(|| {
            let entry = AuditEntry::updated(AuditSubject::user(username), &before, &after);
            if before.password() != after.password() {
                entry.with_redacted_change("password")
            } else {
                entry
            }
        });

        info!("User updated: {}", username);
        Ok(Some(after))
    }

    /// Check whether a username is registered
    pub fn username_exists(&self, username: &str) -> FintrackResult<bool> {
        self.storage.users.username_exists(username)
    }

    /// All users in creation order
    pub fn list_users(&self) -> FintrackResult<Vec<User>> {
        self.storage.users.get_all()
    }

    /// Count users
    pub fn count(&self) -> FintrackResult<usize> {
        self.storage.users.count()
    }
}

fn warn_taken(username: &str) {
    warn!(
        "Username '{}' is already taken. Choose a different username.",
        username
    );
}

//! In-memory user repository
//!
//! Holds users in insertion order. `insert_if_absent` and `update_with` do
//! their check and their write under a single write lock, which is what keeps
//! usernames unique when several threads share one store.

use std::sync::RwLock;

use crate::error::{FintrackError, FintrackResult};
use crate::models::User;

use super::traits::UserLookup;

/// Repository holding every registered user
#[derive(Default)]
pub struct UserRepository {
    data: RwLock<Vec<User>>,
}

impl UserRepository {
    /// Create an empty user repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether any held user has exactly this username
    pub fn username_exists(&self, username: &str) -> Result<bool, FintrackError> {
        let data = self.data.read().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.iter().any(|user| user.username() == username))
    }

    /// Append a user without checking for duplicates
    pub fn add_user(&self, user: User) -> Result<(), FintrackError> {
        let mut data = self.data.write().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.push(user);
        Ok(())
    }

    /// Append a user unless one with the same username is already held
    ///
    /// Returns false, leaving the store untouched, when the name is taken.
    pub fn insert_if_absent(&self, user: User) -> FintrackResult<bool> {
        let mut data = self.data.write().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if data.iter().any(|u| u.username() == user.username()) {
            return Ok(false);
        }
        data.push(user);
        Ok(true)
    }

    /// Remove the first user with this username, returning it if present
    pub fn remove_user(&self, username: &str) -> Result<Option<User>, FintrackError> {
        let mut data = self.data.write().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        match data.iter().position(|user| user.username() == username) {
            Some(index) => Ok(Some(data.remove(index))),
            None => Ok(None),
        }
    }

    /// Get the first user with this username
    pub fn get_user_by_username(&self, username: &str) -> Result<Option<User>, FintrackError> {
        let data = self.data.read().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.iter().find(|user| user.username() == username).cloned())
    }

    /// Apply `change` to the first user with this username
    ///
    /// The change runs on a copy while the write lock is held; the copy is
    /// stored only if `change` succeeds. Returns the `(before, after)` pair, or
    /// `None` when no such user is held.
    pub fn update_with<F>(
        &self,
        username: &str,
        change: F,
    ) -> FintrackResult<Option<(User, User)>>
    where
        F: FnOnce(&mut User) -> FintrackResult<()>,
    {
        let mut data = self.data.write().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let Some(slot) = data.iter_mut().find(|u| u.username() == username) else {
            return Ok(None);
        };

        let before = slot.clone();
        let mut after = before.clone();
        change(&mut after)?;
        *slot = after.clone();

        Ok(Some((before, after)))
    }

    /// Get all users in insertion order
    pub fn get_all(&self) -> Result<Vec<User>, FintrackError> {
        let data = self.data.read().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.clone())
    }

    /// Count users
    pub fn count(&self) -> Result<usize, FintrackError> {
        let data = self.data.read().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }
}

impl UserLookup for UserRepository {
    fn username_exists(&self, username: &str) -> Result<bool, FintrackError> {
        UserRepository::username_exists(self, username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str) -> User {
        User::new(
            "Test",
            "User",
            format!("{}@example.com", username),
            username,
            "Passw0rd!",
        )
        .unwrap()
    }

    #[test]
    fn test_empty_repo() {
        let repo = UserRepository::new();
        assert_eq!(repo.count().unwrap(), 0);
        assert!(!repo.username_exists("alice").unwrap());
        assert!(repo.get_user_by_username("alice").unwrap().is_none());
    }

    #[test]
    fn test_add_and_get() {
        let repo = UserRepository::new();
        repo.add_user(user("alice")).unwrap();

        assert!(repo.username_exists("alice").unwrap());
        let found = repo.get_user_by_username("alice").unwrap().unwrap();
        assert_eq!(found.email(), "alice@example.com");
    }

    #[test]
    fn test_username_match_is_exact() {
        let repo = UserRepository::new();
        repo.add_user(user("alice")).unwrap();

        assert!(!repo.username_exists("Alice").unwrap());
        assert!(!repo.username_exists("alice ").unwrap());
    }

    #[test]
    fn test_remove() {
        let repo = UserRepository::new();
        repo.add_user(user("alice")).unwrap();
        repo.add_user(user("bob")).unwrap();

        let removed = repo.remove_user("alice").unwrap().unwrap();
        assert_eq!(removed.username(), "alice");
        assert_eq!(repo.count().unwrap(), 1);
        assert!(!repo.username_exists("alice").unwrap());

        assert!(repo.remove_user("alice").unwrap().is_none());
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_insert_if_absent() {
        let repo = UserRepository::new();
        assert!(repo.insert_if_absent(user("alice")).unwrap());

        let mut other = user("alice");
        other.set_first_name("Impostor");
        assert!(!repo.insert_if_absent(other).unwrap());

        assert_eq!(repo.count().unwrap(), 1);
        assert_eq!(
            repo.get_user_by_username("alice").unwrap().unwrap().first_name(),
            "Test"
        );
    }

    #[test]
    fn test_update_with() {
        let repo = UserRepository::new();
        repo.add_user(user("alice")).unwrap();

        let (before, after) = repo
            .update_with("alice", |u| {
                u.set_first_name("Alicia");
                Ok(())
            })
            .unwrap()
            .unwrap();
        assert_eq!(before.first_name(), "Test");
        assert_eq!(after.first_name(), "Alicia");
        assert_eq!(repo.get_user_by_username("alice").unwrap().unwrap(), after);

        let missing = repo.update_with("carol", |_| Ok(())).unwrap();
        assert!(missing.is_none());
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_failed_update_with_keeps_stored_user() {
        let repo = UserRepository::new();
        repo.add_user(user("alice")).unwrap();

        let result = repo.update_with("alice", |u| {
            u.set_first_name("Changed");
            u.set_email("not an email")?;
            Ok(())
        });
        assert!(result.unwrap_err().is_validation());
        assert_eq!(
            repo.get_user_by_username("alice").unwrap().unwrap().first_name(),
            "Test"
        );
    }

    #[test]
    fn test_get_all_keeps_insertion_order() {
        let repo = UserRepository::new();
        for name in ["carol", "alice", "bob"] {
            repo.add_user(user(name)).unwrap();
        }
        let names: Vec<_> = repo
            .get_all()
            .unwrap()
            .iter()
            .map(|u| u.username().to_string())
            .collect();
        assert_eq!(names, vec!["carol", "alice", "bob"]);
    }

    #[test]
    fn test_lookup_trait() {
        let repo = UserRepository::new();
        repo.add_user(user("alice")).unwrap();

        let lookup: &dyn UserLookup = &repo;
        assert!(lookup.username_exists("alice").unwrap());
        assert!(!lookup.username_exists("bob").unwrap());
    }
}

//! In-memory user list.

use parking_lot::RwLock;
use thiserror::Error;

use super::models::User;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Missing username or password")]
    MissingField,
    #[error("user already exists.")]
    DuplicateUser,
}

/// Registered users in registration order.
#[derive(Debug, Default)]
pub struct UserStore {
    users: RwLock<Vec<User>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user.
    ///
    /// An empty username or password counts as missing. The duplicate check
    /// and the insert happen under one write guard, so two concurrent
    /// registrations of the same name cannot both succeed.
    pub fn register(&self, username: &str, password: &str) -> Result<(), RegistrationError> {
        if username.is_empty() || password.is_empty() {
            return Err(RegistrationError::MissingField);
        }

        let mut users = self.users.write();
        if users.iter().any(|user| user.username == username) {
            return Err(RegistrationError::DuplicateUser);
        }

        users.push(User {
            username: username.to_string(),
            password: password.to_string(),
        });
        Ok(())
    }

    pub fn exists(&self, username: &str) -> bool {
        self.users.read().iter().any(|user| user.username == username)
    }

    pub fn get(&self, username: &str) -> Option<User> {
        self.users
            .read()
            .iter()
            .find(|user| user.username == username)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

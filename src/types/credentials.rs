use serde::Deserialize;
use std::fmt;

use crate::error::ValidationError;

/// Limits are in UTF-8 bytes.
pub const MAX_USERNAME_LEN: usize = 60;
pub const MAX_PASSWORD_LEN: usize = 120;

/// Username/password pair as submitted by a client.
///
/// Only trust the fields after [`Credentials::validate`] has returned `Ok`; it trims
/// both of them in place.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Normalize and check the pair. Checks run in a fixed order, so the first
    /// failing rule decides the error.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        trim_in_place(&mut self.username);
        trim_in_place(&mut self.password);

        if self.username.is_empty() || self.password.is_empty() {
            return Err(ValidationError::Empty);
        }

        if self.username.len() > MAX_USERNAME_LEN {
            return Err(ValidationError::UsernameTooLong);
        }
        if self.password.len() > MAX_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooLong);
        }

        if self.username.chars().any(is_disallowed) {
            return Err(ValidationError::InvalidUsernameCharacter);
        }

        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A user row as handed to the store: `password` is the plaintext, hashed on write.
#[derive(Clone)]
pub struct User {
    pub username: String,
    pub password: String,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl From<Credentials> for User {
    fn from(c: Credentials) -> Self {
        Self {
            username: c.username,
            password: c.password,
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// C0 controls and DEL.
fn is_disallowed(c: char) -> bool {
    (c as u32) < 32 || c as u32 == 127
}

fn trim_in_place(s: &mut String) {
    let end = s.trim_end().len();
    s.truncate(end);
    let start = s.len() - s.trim_start().len();
    s.drain(..start);
}

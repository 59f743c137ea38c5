//! Failure reporting for the user store.
//!
//! Store operations hand their failures to a [`FailureLog`] supplied at
//! construction. The public API stays coarse (`bool` for lookups, one generic
//! persistence error), but each report still says whether a lookup found no row,
//! hashing failed, or the database was unreachable. Reports never carry a
//! plaintext password.

use std::error::Error as StdError;
use std::fmt;

use tracing::{error, warn};

use crate::error::CredentialError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Exists,
    Authenticate,
    UpdatePassword,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Create => "create",
            Operation::Exists => "exists",
            Operation::Authenticate => "authenticate",
            Operation::UpdatePassword => "update_password",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Outcome<'a> {
    /// No row matched the username.
    NotFound,
    /// Hashing or hash verification failed.
    Hashing(&'a CredentialError),
    /// The database or the transaction failed.
    Unavailable(&'a (dyn StdError + 'static)),
}

pub trait FailureLog: Send + Sync {
    fn report(&self, op: Operation, username: &str, outcome: Outcome<'_>);
}

/// Default sink: emits `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl FailureLog for TracingLog {
    fn report(&self, op: Operation, username: &str, outcome: Outcome<'_>) {
        match outcome {
            Outcome::NotFound if op == Operation::UpdatePassword => {
                warn!(op = %op, username, "password update matched no user");
            }
            Outcome::NotFound => {
                error!(op = %op, username, "user not found");
            }
            Outcome::Hashing(e) => {
                error!(op = %op, username, error = %e, "password hashing failed");
            }
            Outcome::Unavailable(e) => {
                error!(op = %op, username, error = %e, "database operation failed");
            }
        }
    }
}

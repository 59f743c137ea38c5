pub mod config;
pub mod db;
pub mod error;
pub mod service;
pub mod types;

pub use db::UserStore;
pub use error::{CredentialError, ValidationError};
pub use types::{Credentials, User};

//! Database module: row model, schema and the user store.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: `UserStore`, the create/exists/authenticate/update operations

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::DbUser;
pub use schema::SQLITE_INIT;
pub use sqlite::{SqlitePool, UserStore};

use crate::config::Config;
use crate::error::CredentialError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

/// Open a pool for `cfg.database_url`, creating the database file if missing.
pub async fn connect(cfg: &Config) -> Result<SqlitePool, CredentialError> {
    let connect_opts =
        SqliteConnectOptions::from_str(cfg.database_url.as_str())?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(cfg.max_connections.max(1))
        .connect_with(connect_opts)
        .await?;
    Ok(pool)
}

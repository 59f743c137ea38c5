//! SQL DDL for the user table.
//! SQLite-first; callers with their own migrations can ignore it.

/// SQLite schema with:
/// - `username` TEXT UNIQUE: the uniqueness rule lives here, not in application code
/// - `password` TEXT: bcrypt modular-crypt string, never plaintext
///
/// `user` is quoted so the DDL also reads correctly on engines that reserve it.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS "user" (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL
);
"#;

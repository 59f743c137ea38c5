use sqlx::FromRow;

/// A stored user row. `password` holds the bcrypt hash.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbUser {
    pub username: String,
    pub password: String,
}

use crate::db::models::DbUser;
use crate::db::schema::SQLITE_INIT;
use crate::error::CredentialError;
use crate::service::audit::{FailureLog, Operation, Outcome, TracingLog};
use crate::service::password::{hash_password, verify_password};
use crate::types::User;
use sqlx::{Pool, Sqlite};
use std::sync::Arc;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

/// Users table access. Every write runs in its own transaction, which sqlx rolls
/// back on drop unless it was committed.
#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
    log: Arc<dyn FailureLog>,
}

impl UserStore {
    pub fn new(pool: SqlitePool, log: Arc<dyn FailureLog>) -> Self {
        Self { pool, log }
    }

    pub fn with_tracing(pool: SqlitePool) -> Self {
        Self::new(pool, Arc::new(TracingLog))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), CredentialError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Hash the plaintext password and insert a new row.
    ///
    /// A duplicate username fails on the UNIQUE constraint and comes back as
    /// [`CredentialError::Persistence`]; see [`CredentialError::is_unique_violation`].
    pub async fn create(&self, user: &User) -> Result<(), CredentialError> {
        let hashed = hash_password(user.password.clone())
            .await
            .inspect_err(|e| self.report(Operation::Create, &user.username, e))?;

        self.insert(&user.username, &hashed)
            .await
            .inspect_err(|e| self.report(Operation::Create, &user.username, e))
    }

    async fn insert(&self, username: &str, hashed: &str) -> Result<(), CredentialError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(r#"INSERT INTO "user" (username, password) VALUES (?, ?)"#)
            .bind(username)
            .bind(hashed)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    /// Whether a row exists for `user.username`. A failed query also yields `false`;
    /// the failure only goes to the log.
    pub async fn exists(&self, user: &User) -> bool {
        let found: Result<Option<(i64,)>, sqlx::Error> =
            sqlx::query_as(r#"SELECT 1 FROM "user" WHERE username = ? LIMIT 1"#)
                .bind(&user.username)
                .fetch_optional(&self.pool)
                .await;

        match found {
            Ok(row) => row.is_some(),
            Err(e) => {
                self.log
                    .report(Operation::Exists, &user.username, Outcome::Unavailable(&e));
                false
            }
        }
    }

    /// Check the plaintext password against the stored hash.
    ///
    /// Unknown user, wrong password and lookup failure all return `false`. Only the
    /// first and last are reported; a mismatch is an expected answer.
    pub async fn authenticate(&self, user: &User) -> bool {
        let row: Option<DbUser> =
            match sqlx::query_as(r#"SELECT username, password FROM "user" WHERE username = ?"#)
                .bind(&user.username)
                .fetch_optional(&self.pool)
                .await
            {
                Ok(row) => row,
                Err(e) => {
                    self.log.report(
                        Operation::Authenticate,
                        &user.username,
                        Outcome::Unavailable(&e),
                    );
                    return false;
                }
            };

        let Some(stored) = row else {
            self.log
                .report(Operation::Authenticate, &user.username, Outcome::NotFound);
            return false;
        };

        match verify_password(user.password.clone(), stored.password).await {
            Ok(true) => true,
            Ok(false) => {
                debug!(username = %user.username, "password mismatch");
                false
            }
            Err(e) => {
                self.report(Operation::Authenticate, &user.username, &e);
                false
            }
        }
    }

    /// Replace the stored hash with one for `user.password`.
    ///
    /// The current password is not checked here. Callers must re-authenticate the
    /// user before calling this. An unknown username updates nothing and still
    /// returns `Ok(())`.
    pub async fn update_password(&self, user: &User) -> Result<(), CredentialError> {
        let hashed = hash_password(user.password.clone())
            .await
            .inspect_err(|e| self.report(Operation::UpdatePassword, &user.username, e))?;

        let affected = self
            .replace_hash(&user.username, &hashed)
            .await
            .inspect_err(|e| self.report(Operation::UpdatePassword, &user.username, e))?;

        if affected == 0 {
            self.log
                .report(Operation::UpdatePassword, &user.username, Outcome::NotFound);
        }
        Ok(())
    }

    async fn replace_hash(&self, username: &str, hashed: &str) -> Result<u64, CredentialError> {
        let mut tx = self.pool.begin().await?;
        let done = sqlx::query(r#"UPDATE "user" SET password = ? WHERE username = ?"#)
            .bind(hashed)
            .bind(username)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(done.rows_affected())
    }

    fn report(&self, op: Operation, username: &str, err: &CredentialError) {
        let outcome = match err {
            CredentialError::Persistence(db) => Outcome::Unavailable(db),
            CredentialError::Hashing(_) | CredentialError::Worker(_) => Outcome::Hashing(err),
            other => Outcome::Unavailable(other),
        };
        self.log.report(op, username, outcome);
    }
}

#![allow(dead_code)]

use credstore::config::Config;
use credstore::service::{FailureLog, Operation, Outcome};
use credstore::{UserStore, db};
use std::{
    fs,
    path::PathBuf,
    sync::{Arc, Mutex},
    time::{SystemTime, UNIX_EPOCH},
};

/// One report as seen by the store's failure log, flattened to text.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub op: Operation,
    pub username: String,
    pub kind: &'static str,
    pub detail: String,
}

#[derive(Default)]
pub struct RecordingLog {
    reports: Mutex<Vec<Report>>,
}

impl RecordingLog {
    pub fn reports(&self) -> Vec<Report> {
        self.reports.lock().expect("log poisoned").clone()
    }
}

impl FailureLog for RecordingLog {
    fn report(&self, op: Operation, username: &str, outcome: Outcome<'_>) {
        let (kind, detail) = match outcome {
            Outcome::NotFound => ("not_found", String::new()),
            Outcome::Hashing(e) => ("hashing", format!("{e:?}")),
            Outcome::Unavailable(e) => ("unavailable", format!("{e:?}")),
        };
        self.reports.lock().expect("log poisoned").push(Report {
            op,
            username: username.to_string(),
            kind,
            detail,
        });
    }
}

/// A store on a fresh SQLite file; the file is removed when this is dropped.
pub struct TestDb {
    pub store: UserStore,
    pub log: Arc<RecordingLog>,
    path: PathBuf,
}

impl TestDb {
    pub async fn new(label: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();

        let mut path = std::env::temp_dir();
        path.push(format!(
            "credstore-{label}-{}-{}.sqlite",
            std::process::id(),
            nanos
        ));

        let cfg = Config {
            database_url: format!("sqlite:{}", path.display()),
            ..Config::default()
        };
        let pool = db::connect(&cfg).await.expect("failed to open database");
        let log = Arc::new(RecordingLog::default());
        let store = UserStore::new(pool, log.clone());
        store.init_schema().await.expect("failed to create schema");

        Self { store, log, path }
    }

    pub async fn row_count(&self) -> i64 {
        let (n,): (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM "user""#)
            .fetch_one(self.store.pool())
            .await
            .expect("count query failed");
        n
    }

    pub async fn stored_hash(&self, username: &str) -> Option<String> {
        sqlx::query_as::<_, (String,)>(r#"SELECT password FROM "user" WHERE username = ?"#)
            .bind(username)
            .fetch_optional(self.store.pool())
            .await
            .expect("hash query failed")
            .map(|(h,)| h)
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
        for suffix in ["-wal", "-shm"] {
            let mut side = self.path.clone().into_os_string();
            side.push(suffix);
            let _ = fs::remove_file(side);
        }
    }
}

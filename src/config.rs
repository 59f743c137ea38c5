use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

use crate::error::CredentialError;

/// Environment variables with this prefix override the defaults,
/// e.g. `CREDSTORE_DATABASE_URL`.
pub const ENV_PREFIX: &str = "CREDSTORE_";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub database_url: String,
    pub loglevel: String,
    pub max_connections: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://credstore.db".to_string(),
            loglevel: "info".to_string(),
            max_connections: 5,
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load() -> Result<Self, CredentialError> {
        Ok(Self::figment().extract()?)
    }

    /// Like [`Config::load`], but falls back to defaults. The load error is handed
    /// back so the caller can log it once a subscriber is installed.
    pub fn load_or_default() -> (Self, Option<CredentialError>) {
        match Self::load() {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
}

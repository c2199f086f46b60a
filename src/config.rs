use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::modules::content::application::ports::outgoing::ChangeFeed;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid {key} value: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Where content is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceBackend {
    /// JSON documents in `CONTENT_DIR`, single process
    Local,
    /// In-process shared document service
    Shared,
    /// Postgres tables with `LISTEN/NOTIFY` change propagation
    Postgres,
}

impl FromStr for PersistenceBackend {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "shared" => Ok(Self::Shared),
            "postgres" => Ok(Self::Postgres),
            _ => Err(()),
        }
    }
}

const DEFAULT_ADMIN_SESSION_TTL_SECS: u64 = 8 * 60 * 60;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub backend: PersistenceBackend,
    pub content_dir: PathBuf,
    /// Only present (and required) for the Postgres backend
    pub database_url: Option<String>,
    pub admin_passcode: String,
    pub change_feed_capacity: usize,
    pub admin_session_ttl: Duration,
}

impl AppConfig {
    /// Reads the process environment. Call after the `.env` files are loaded.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = value("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_or("PORT", value("PORT"), 8080)?;

        let backend = match value("PERSISTENCE_BACKEND") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "PERSISTENCE_BACKEND",
                value: raw,
            })?,
            None => PersistenceBackend::Local,
        };

        let database_url = value("DATABASE_URL");
        if backend == PersistenceBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let admin_passcode = value("ADMIN_PASSCODE").ok_or(ConfigError::Missing("ADMIN_PASSCODE"))?;

        let change_feed_capacity = parse_or(
            "CHANGE_FEED_CAPACITY",
            value("CHANGE_FEED_CAPACITY"),
            ChangeFeed::DEFAULT_CAPACITY,
        )?;
        // broadcast channels panic on a zero capacity
        if change_feed_capacity == 0 {
            return Err(ConfigError::Invalid {
                key: "CHANGE_FEED_CAPACITY",
                value: "0".to_string(),
            });
        }

        let admin_session_ttl = parse_or(
            "ADMIN_SESSION_TTL_SECS",
            value("ADMIN_SESSION_TTL_SECS"),
            DEFAULT_ADMIN_SESSION_TTL_SECS,
        )?;
        if admin_session_ttl == 0 {
            return Err(ConfigError::Invalid {
                key: "ADMIN_SESSION_TTL_SECS",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            host,
            port,
            backend,
            content_dir: value("CONTENT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./content")),
            database_url,
            admin_passcode,
            change_feed_capacity,
            admin_session_ttl: Duration::from_secs(admin_session_ttl),
        })
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}

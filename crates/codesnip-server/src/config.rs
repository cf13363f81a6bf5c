use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use codesnip_core::collection;
use thiserror::Error;

pub const MONGODB_URI: &str = "MONGODB_URI";
pub const DATABASE: &str = "CODESNIP_DATABASE";
pub const BIND_ADDR: &str = "CODESNIP_BIND_ADDR";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:9000";

/// How long in-flight requests may run once shutdown starts.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Upper bound on a single request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Outcome of looking for a `.env` file. Only `Invalid` deserves a warning;
/// running without a file is normal.
#[derive(Debug)]
pub enum Dotenv {
    Loaded(PathBuf),
    NotFound,
    Invalid(String),
}

impl Dotenv {
    fn from_result(result: Result<PathBuf, dotenvy::Error>) -> Self {
        match result {
            Ok(path) => Dotenv::Loaded(path),
            Err(e) if e.not_found() => Dotenv::NotFound,
            Err(e) => Dotenv::Invalid(e.to_string()),
        }
    }

    pub fn log(&self) {
        match self {
            Dotenv::Loaded(path) => tracing::info!(path = %path.display(), "loaded .env file"),
            Dotenv::NotFound => tracing::info!("no .env file found"),
            Dotenv::Invalid(error) => tracing::warn!(error = %error, "ignoring unreadable .env file"),
        }
    }
}

/// Load `.env` from the working directory or its parents. Variables already
/// set in the process environment win.
pub fn load_dotenv() -> Dotenv {
    Dotenv::from_result(dotenvy::dotenv())
}

pub fn load_dotenv_from(path: &Path) -> Dotenv {
    Dotenv::from_result(dotenvy::from_path(path).map(|()| path.to_path_buf()))
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "you must set the {0} environment variable, see https://www.mongodb.com/docs/drivers/rust/current/fundamentals/connections/connection-guide/"
    )]
    Missing(&'static str),

    #[error("invalid CODESNIP_BIND_ADDR {value:?}: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
}

/// Startup settings, read once from the environment.
#[derive(Clone)]
pub struct ServerConfig {
    pub mongodb_uri: String,
    pub database: String,
    pub bind_addr: SocketAddr,
    pub request_timeout: Duration,
    pub shutdown_grace: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mongodb_uri = get(MONGODB_URI).ok_or(ConfigError::Missing(MONGODB_URI))?;
        let database = get(DATABASE).unwrap_or_else(|| collection::DEFAULT_DATABASE.to_string());

        let raw_addr = get(BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::BindAddr {
                value: raw_addr.clone(),
                source,
            })?;

        Ok(Self {
            mongodb_uri,
            database,
            bind_addr,
            request_timeout: REQUEST_TIMEOUT,
            shutdown_grace: SHUTDOWN_GRACE,
        })
    }
}

// The URI may embed credentials, so it is left out.
impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("database", &self.database)
            .field("bind_addr", &self.bind_addr)
            .field("request_timeout", &self.request_timeout)
            .field("shutdown_grace", &self.shutdown_grace)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn missing_uri_is_an_error() {
        let err = ServerConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(MONGODB_URI)));
    }

    #[test]
    fn blank_uri_counts_as_missing() {
        let err = ServerConfig::from_lookup(lookup(&[(MONGODB_URI, "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(_)));
    }

    #[test]
    fn defaults_apply_when_only_uri_is_set() {
        let config =
            ServerConfig::from_lookup(lookup(&[(MONGODB_URI, "mongodb://localhost:27017")]))
                .unwrap();

        assert_eq!(config.mongodb_uri, "mongodb://localhost:27017");
        assert_eq!(config.database, "Code-Snippet-Manager");
        assert_eq!(config.bind_addr, "0.0.0.0:9000".parse().unwrap());
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.shutdown_grace, Duration::from_secs(5));
    }

    #[test]
    fn overrides_are_honoured() {
        let config = ServerConfig::from_lookup(lookup(&[
            (MONGODB_URI, "mongodb://db"),
            (DATABASE, "snippets-test"),
            (BIND_ADDR, "127.0.0.1:8080"),
        ]))
        .unwrap();

        assert_eq!(config.database, "snippets-test");
        assert_eq!(config.bind_addr, "127.0.0.1:8080".parse().unwrap());
    }

    #[test]
    fn bad_bind_addr_is_reported() {
        let err = ServerConfig::from_lookup(lookup(&[
            (MONGODB_URI, "mongodb://db"),
            (BIND_ADDR, ":9000"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::BindAddr { value, .. } if value == ":9000"));
    }

    #[test]
    fn dotenv_file_feeds_the_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(
            &path,
            "CODESNIP_DOTENV_TEST_URI=mongodb://from-dotenv:27017\n",
        )
        .unwrap();

        assert!(matches!(load_dotenv_from(&path), Dotenv::Loaded(p) if p == path));

        let config = ServerConfig::from_lookup(|key| {
            let key = if key == MONGODB_URI { "CODESNIP_DOTENV_TEST_URI" } else { key };
            env::var(key).ok()
        })
        .unwrap();
        assert_eq!(config.mongodb_uri, "mongodb://from-dotenv:27017");
    }

    #[test]
    fn missing_dotenv_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_dotenv_from(&dir.path().join(".env")),
            Dotenv::NotFound
        ));
    }

    #[test]
    fn malformed_dotenv_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "NOT A VALID LINE\n").unwrap();

        assert!(matches!(load_dotenv_from(&path), Dotenv::Invalid(_)));
    }

    #[test]
    fn debug_output_hides_uri() {
        let config =
            ServerConfig::from_lookup(lookup(&[(MONGODB_URI, "mongodb://user:secret@db")]))
                .unwrap();
        assert!(!format!("{config:?}").contains("secret"));
    }
}

use std::env;
use std::str::FromStr;

use crate::error::{AppError, AppResult};

/// MySQL connection settings.
///
/// Defaults match a local development server with the `GameStoreLite`
/// schema and its stored procedures installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 3306,
            user: "root".into(),
            password: String::new(),
            database: "GameStoreLite".into(),
            max_connections: 1,
            acquire_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db: DbConfig,
    pub log_file: String,
    pub log_filter: String,
}

impl Config {
    /// Load from the process environment (after `.env`, if present).
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | DB_HOST | localhost |
    /// | DB_PORT | 3306 |
    /// | DB_USER | root |
    /// | DB_PASSWORD | (empty) |
    /// | DB_NAME | GameStoreLite |
    /// | DB_MAX_CONNECTIONS | 1 |
    /// | DB_ACQUIRE_TIMEOUT_SECS | 10 |
    /// | LOG_FILE | gamestore-lite.log |
    /// | RUST_LOG | gamestore_lite=info |
    pub fn from_env() -> AppResult<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = DbConfig::default();
        let text = |key: &str, default: String| lookup(key).unwrap_or(default);

        let db = DbConfig {
            host: text("DB_HOST", defaults.host),
            port: parse_or(&lookup, "DB_PORT", defaults.port)?,
            user: text("DB_USER", defaults.user),
            password: text("DB_PASSWORD", defaults.password),
            database: text("DB_NAME", defaults.database),
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.max_connections)?,
            acquire_timeout_secs: parse_or(
                &lookup,
                "DB_ACQUIRE_TIMEOUT_SECS",
                defaults.acquire_timeout_secs,
            )?,
        };

        if db.max_connections == 0 {
            return Err(AppError::Config {
                key: "DB_MAX_CONNECTIONS",
                value: "0".into(),
            });
        }

        Ok(Self {
            db,
            log_file: text("LOG_FILE", "gamestore-lite.log".into()),
            log_filter: text("RUST_LOG", "gamestore_lite=info".into()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| AppError::Config { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_local_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.db, DbConfig::default());
        assert_eq!(config.db.database, "GameStoreLite");
        assert_eq!(config.db.user, "root");
        assert!(config.db.password.is_empty());
        assert_eq!(config.log_file, "gamestore-lite.log");
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup(&[
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "3307"),
            ("DB_PASSWORD", "s3cret"),
            ("DB_MAX_CONNECTIONS", "4"),
            ("LOG_FILE", "/tmp/store.log"),
        ]))
        .unwrap();
        assert_eq!(config.db.host, "db.internal");
        assert_eq!(config.db.port, 3307);
        assert_eq!(config.db.password, "s3cret");
        assert_eq!(config.db.max_connections, 4);
        assert_eq!(config.log_file, "/tmp/store.log");
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = Config::from_lookup(lookup(&[("DB_PORT", "mysql")])).unwrap_err();
        match err {
            AppError::Config { key, value } => {
                assert_eq!(key, "DB_PORT");
                assert_eq!(value, "mysql");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn zero_pool_size_is_rejected() {
        assert!(Config::from_lookup(lookup(&[("DB_MAX_CONNECTIONS", "0")])).is_err());
    }
}

use crate::error::BallotError;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

pub const DEFAULT_CATALOG_URL: &str = "https://dog.ceo/api";

/// Keys read from the process environment (matched case-insensitively).
const ENV_KEYS: &[&str] = &[
    "port",
    "host",
    "database_url",
    "catalog_url",
    "catalog_timeout_secs",
    "catalog_retries",
    "proxy",
    "seed_concurrency",
    "db_max_connections",
    "bootstrap_schema",
    "loglevel",
];

/// Raw environment layer. `port` and `database_url` have no default and are
/// checked after extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EnvConfig {
    port: Option<u16>,
    host: String,
    database_url: Option<String>,
    catalog_url: Url,
    catalog_timeout_secs: u64,
    catalog_retries: usize,
    proxy: Option<Url>,
    seed_concurrency: usize,
    db_max_connections: u32,
    bootstrap_schema: bool,
    loglevel: String,
}

impl Default for EnvConfig {
    fn default() -> Self {
        let defaults = Config::default();
        Self {
            port: None,
            host: defaults.host,
            database_url: None,
            catalog_url: defaults.catalog_url,
            catalog_timeout_secs: defaults.catalog_timeout_secs,
            catalog_retries: defaults.catalog_retries,
            proxy: defaults.proxy,
            seed_concurrency: defaults.seed_concurrency,
            db_max_connections: defaults.db_max_connections,
            bootstrap_schema: defaults.bootstrap_schema,
            loglevel: defaults.loglevel,
        }
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub host: String,
    pub database_url: String,
    /// Set when `LOCAL` is non-empty: the store connection skips TLS.
    pub local: bool,
    pub catalog_url: Url,
    pub catalog_timeout_secs: u64,
    pub catalog_retries: usize,
    pub proxy: Option<Url>,
    pub seed_concurrency: usize,
    pub db_max_connections: u32,
    pub bootstrap_schema: bool,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".to_string(),
            database_url: "postgres://localhost/breeds".to_string(),
            local: false,
            catalog_url: Url::parse(DEFAULT_CATALOG_URL).expect("default catalog url is valid"),
            catalog_timeout_secs: 15,
            catalog_retries: 0,
            proxy: None,
            seed_concurrency: 16,
            db_max_connections: 5,
            bootstrap_schema: true,
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    /// Load from the process environment. Call `dotenvy::dotenv()` first to
    /// pick up a `.env` file.
    pub fn from_env() -> Result<Self, BallotError> {
        let figment = Figment::from(Serialized::defaults(EnvConfig::default()))
            .merge(Env::raw().only(ENV_KEYS));
        // LOCAL toggles on any non-empty value; the value itself is never parsed.
        let local = std::env::var_os("LOCAL").is_some_and(|v| !v.is_empty());
        Self::from_figment(figment, local)
    }

    fn from_figment(figment: Figment, local: bool) -> Result<Self, BallotError> {
        let raw: EnvConfig = figment.extract().map_err(Box::new)?;
        let port = raw.port.ok_or(BallotError::MissingEnv("PORT"))?;
        let database_url = raw
            .database_url
            .filter(|s| !s.trim().is_empty())
            .ok_or(BallotError::MissingEnv("DATABASE_URL"))?;

        Ok(Self {
            port,
            host: raw.host,
            database_url,
            local,
            catalog_url: raw.catalog_url,
            catalog_timeout_secs: raw.catalog_timeout_secs,
            catalog_retries: raw.catalog_retries,
            proxy: raw.proxy,
            seed_concurrency: raw.seed_concurrency.max(1),
            db_max_connections: raw.db_max_connections.max(1),
            bootstrap_schema: raw.bootstrap_schema,
            loglevel: raw.loglevel,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn catalog_timeout(&self) -> Duration {
        Duration::from_secs(self.catalog_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn missing_port_is_fatal() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("DATABASE_URL", "postgres://localhost/breeds");
            let err = Config::from_env().unwrap_err();
            assert!(matches!(err, BallotError::MissingEnv("PORT")));
            Ok(())
        });
    }

    #[test]
    fn missing_database_url_is_fatal() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("PORT", "3000");
            let err = Config::from_env().unwrap_err();
            assert!(matches!(err, BallotError::MissingEnv("DATABASE_URL")));
            Ok(())
        });
    }

    #[test]
    fn defaults_fill_optional_keys() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("PORT", "3000");
            jail.set_env("DATABASE_URL", "postgres://db/breeds");
            let cfg = Config::from_env().expect("config loads");
            assert_eq!(cfg.port, 3000);
            assert_eq!(cfg.database_url, "postgres://db/breeds");
            assert!(!cfg.local);
            assert_eq!(cfg.catalog_url.as_str(), "https://dog.ceo/api");
            assert_eq!(cfg.catalog_retries, 0);
            assert_eq!(cfg.seed_concurrency, 16);
            assert!(cfg.bootstrap_schema);
            assert_eq!(cfg.bind_addr(), "0.0.0.0:3000");
            Ok(())
        });
    }

    #[test]
    fn local_presence_toggles_tls_off() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("PORT", "3000");
            jail.set_env("DATABASE_URL", "postgres://db/breeds");
            jail.set_env("LOCAL", "1");
            let cfg = Config::from_env().expect("config loads");
            assert!(cfg.local);
            Ok(())
        });
    }

    #[test]
    fn empty_local_keeps_tls_on() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("PORT", "3000");
            jail.set_env("DATABASE_URL", "postgres://db/breeds");
            jail.set_env("LOCAL", "");
            let cfg = Config::from_env().expect("config loads");
            assert!(!cfg.local);
            Ok(())
        });
    }

    #[test]
    fn overrides_are_read_case_insensitively() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("PORT", "4000");
            jail.set_env("DATABASE_URL", "postgres://db/breeds");
            jail.set_env("CATALOG_URL", "http://127.0.0.1:9999/api");
            jail.set_env("SEED_CONCURRENCY", "0");
            jail.set_env("BOOTSTRAP_SCHEMA", "false");
            let cfg = Config::from_env().expect("config loads");
            assert_eq!(cfg.catalog_url.as_str(), "http://127.0.0.1:9999/api");
            assert_eq!(cfg.seed_concurrency, 1);
            assert!(!cfg.bootstrap_schema);
            Ok(())
        });
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Configuration resolution.
//!
//! [`resolve`] is a single linear pass over an [`EnvSource`]:
//!
//! 1. `ENV_NAME` decides debug mode (`DEV` only).
//! 2. `SECRET_KEY` falls back to the insecure literal, which is rejected
//!    outside `DEV`.
//! 3. `ALLOWED_HOSTS` is split on `,` unless debug mode forces `["*"]`.
//! 4. `DB_*` produce PostgreSQL parameters, swapped for the embedded test
//!    backend under [`RunMode::Test`].
//! 5. Display strings, logging and bind address are passed through.

use std::fmt;
use std::net::{IpAddr, SocketAddr};

use serde::Serialize;

use super::database::{DatabaseEngine, DatabaseParams};
use super::{
    ConfigError, EnvSource, ALLOWED_HOSTS_ENV, APP_DESCRIPTION_ENV, APP_NAME_ENV, DB_HOST_ENV,
    DB_NAME_ENV, DB_PASS_ENV, DB_USER_ENV, DEFAULT_APP_DESCRIPTION, DEFAULT_APP_NAME,
    DEFAULT_HOST, DEFAULT_LOG_LEVEL, DEFAULT_PORT, DEV_ENVIRONMENT, ENV_NAME_ENV, HOST_ENV,
    INSECURE_DEFAULT_SECRET_KEY, LOG_FORMAT_ENV, LOG_LEVEL_ENV, PORT_ENV, SECRET_KEY_ENV,
};

/// Host pattern that admits every request.
pub const WILDCARD_HOST: &str = "*";

/// How the process was invoked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    /// Normal operation against the primary database.
    #[default]
    Standard,
    /// Test run; the embedded database replaces the primary one.
    Test,
}

impl RunMode {
    pub fn is_test(self) -> bool {
        self == RunMode::Test
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value. Anything other than `json` is pretty.
    pub fn from_env_str(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Fully resolved runtime configuration.
///
/// Built once at startup and shared read-only afterwards. `Debug` redacts
/// the secret key and database password.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub environment_name: String,
    pub secret_key: String,
    pub debug: bool,
    pub allowed_hosts: Vec<String>,
    pub database: DatabaseParams,
    pub app_name: String,
    pub app_description: String,
    pub log_level: String,
    pub log_format: LogFormat,
    pub listen_addr: SocketAddr,
}

/// Resolve configuration from a snapshot.
///
/// # Errors
/// - [`ConfigError::InsecureSecretKey`] when the default secret key is in
///   effect and `ENV_NAME` is not `DEV`.
/// - [`ConfigError::InvalidValue`] when `HOST` or `PORT` cannot be parsed.
pub fn resolve(source: &EnvSource, run_mode: RunMode) -> Result<ResolvedConfig, ConfigError> {
    let environment_name = source.get_or(ENV_NAME_ENV, DEV_ENVIRONMENT).to_string();
    let debug = environment_name == DEV_ENVIRONMENT;

    let secret_key = source
        .get_or(SECRET_KEY_ENV, INSECURE_DEFAULT_SECRET_KEY)
        .to_string();
    if secret_key == INSECURE_DEFAULT_SECRET_KEY && !debug {
        return Err(ConfigError::InsecureSecretKey {
            environment: environment_name,
        });
    }

    let allowed_hosts = if debug {
        vec![WILDCARD_HOST.to_string()]
    } else {
        source
            .get_or(ALLOWED_HOSTS_ENV, "")
            .split(',')
            .map(str::to_string)
            .collect()
    };

    let database = if run_mode.is_test() {
        DatabaseParams::test_database()
    } else {
        DatabaseParams::postgres(
            source.get_or(DB_NAME_ENV, ""),
            source.get_or(DB_USER_ENV, ""),
            source.get_or(DB_PASS_ENV, ""),
            source.get_or(DB_HOST_ENV, ""),
        )
    };

    Ok(ResolvedConfig {
        environment_name,
        secret_key,
        debug,
        allowed_hosts,
        database,
        app_name: source.get_or(APP_NAME_ENV, DEFAULT_APP_NAME).to_string(),
        app_description: source
            .get_or(APP_DESCRIPTION_ENV, DEFAULT_APP_DESCRIPTION)
            .to_string(),
        log_level: source.get_or(LOG_LEVEL_ENV, DEFAULT_LOG_LEVEL).to_string(),
        log_format: source
            .get(LOG_FORMAT_ENV)
            .map(LogFormat::from_env_str)
            .unwrap_or_default(),
        listen_addr: resolve_listen_addr(source)?,
    })
}

fn resolve_listen_addr(source: &EnvSource) -> Result<SocketAddr, ConfigError> {
    let host = source.get_or(HOST_ENV, DEFAULT_HOST);
    let ip: IpAddr = host.trim().parse().map_err(|e| ConfigError::InvalidValue {
        var: HOST_ENV,
        message: format!("{host:?} is not an IP address: {e}"),
    })?;

    let port = match source.get(PORT_ENV) {
        Some(raw) => raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
            var: PORT_ENV,
            message: format!("{raw:?} is not a valid port: {e}"),
        })?,
        None => DEFAULT_PORT,
    };

    Ok(SocketAddr::new(ip, port))
}

impl ResolvedConfig {
    /// Whether the built-in secret key is in effect.
    pub fn uses_default_secret_key(&self) -> bool {
        self.secret_key == INSECURE_DEFAULT_SECRET_KEY
    }

    /// Whether the allowlist admits every host.
    pub fn allows_any_host(&self) -> bool {
        self.allowed_hosts.iter().any(|host| host == WILDCARD_HOST)
    }

    /// Whether the allowlist has no usable entries, so every request is
    /// rejected. Happens when `ALLOWED_HOSTS` is unset outside debug mode.
    pub fn allowed_hosts_deny_all(&self) -> bool {
        self.allowed_hosts.iter().all(|host| host.trim().is_empty())
    }

    /// Secret-free view for printing.
    pub fn summary(&self) -> ConfigSummary {
        ConfigSummary {
            environment: self.environment_name.clone(),
            debug: self.debug,
            allowed_hosts: self.allowed_hosts.clone(),
            database_engine: self.database.engine,
            database_name: self.database.name.clone(),
            database_host: self.database.host.clone(),
            database_port: self.database.port,
            database_password_set: self.database.has_password(),
            app_name: self.app_name.clone(),
            app_description: self.app_description.clone(),
            log_level: self.log_level.clone(),
            log_format: self.log_format,
            listen_addr: self.listen_addr.to_string(),
            default_secret_key: self.uses_default_secret_key(),
        }
    }
}

impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("environment_name", &self.environment_name)
            .field("secret_key", &"<redacted>")
            .field("debug", &self.debug)
            .field("allowed_hosts", &self.allowed_hosts)
            .field("database", &self.database)
            .field("app_name", &self.app_name)
            .field("app_description", &self.app_description)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .field("listen_addr", &self.listen_addr)
            .finish()
    }
}

/// Printable configuration without secrets.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSummary {
    pub environment: String,
    pub debug: bool,
    pub allowed_hosts: Vec<String>,
    pub database_engine: DatabaseEngine,
    pub database_name: String,
    pub database_host: String,
    pub database_port: Option<u16>,
    pub database_password_set: bool,
    pub app_name: String,
    pub app_description: String,
    pub log_level: String,
    pub log_format: LogFormat,
    pub listen_addr: String,
    pub default_secret_key: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUSTOM_KEY: &str = "a-real-production-secret";

    fn production() -> EnvSource {
        EnvSource::new()
            .with_var("ENV_NAME", "PROD")
            .with_var("SECRET_KEY", CUSTOM_KEY)
    }

    #[test]
    fn defaults_resolve_to_dev() {
        let config = resolve(&EnvSource::new(), RunMode::Standard).unwrap();

        assert_eq!(config.environment_name, "DEV");
        assert!(config.debug);
        assert_eq!(config.allowed_hosts, vec!["*"]);
        assert!(config.uses_default_secret_key());
        assert_eq!(config.app_name, "django base app");
        assert_eq!(config.app_description, "django base app");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.listen_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.database.engine, DatabaseEngine::Postgresql);
        assert_eq!(config.database.name, "");
        assert_eq!(config.database.port, Some(5432));
    }

    #[test]
    fn non_dev_with_default_key_is_rejected() {
        for env_name in ["PROD", "STAGING", "dev", ""] {
            let source = EnvSource::new().with_var("ENV_NAME", env_name);
            let result = resolve(&source, RunMode::Standard);
            match result {
                Err(ConfigError::InsecureSecretKey { environment }) => {
                    assert_eq!(environment, env_name)
                }
                other => panic!("expected InsecureSecretKey for {env_name:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn explicit_default_key_is_also_rejected() {
        let source = EnvSource::new()
            .with_var("ENV_NAME", "PROD")
            .with_var("SECRET_KEY", INSECURE_DEFAULT_SECRET_KEY);
        assert!(matches!(
            resolve(&source, RunMode::Standard),
            Err(ConfigError::InsecureSecretKey { .. })
        ));
    }

    #[test]
    fn dev_succeeds_regardless_of_key() {
        for key in [None, Some(CUSTOM_KEY), Some(INSECURE_DEFAULT_SECRET_KEY)] {
            let mut source = EnvSource::new()
                .with_var("ENV_NAME", "DEV")
                .with_var("ALLOWED_HOSTS", "ignored.example.com");
            if let Some(key) = key {
                source = source.with_var("SECRET_KEY", key);
            }

            let config = resolve(&source, RunMode::Standard).unwrap();
            assert!(config.debug);
            assert_eq!(config.allowed_hosts, vec!["*"]);
            assert!(config.allows_any_host());
        }
    }

    #[test]
    fn production_splits_allowed_hosts() {
        let source = production().with_var("ALLOWED_HOSTS", "a,b,c");
        let config = resolve(&source, RunMode::Standard).unwrap();

        assert!(!config.debug);
        assert_eq!(config.allowed_hosts, vec!["a", "b", "c"]);
        assert!(!config.allows_any_host());
        assert!(!config.allowed_hosts_deny_all());
        assert!(!config.uses_default_secret_key());
    }

    #[test]
    fn production_without_allowed_hosts_denies_all() {
        let config = resolve(&production(), RunMode::Standard).unwrap();

        assert_eq!(config.allowed_hosts, vec![""]);
        assert!(config.allowed_hosts_deny_all());
    }

    #[test]
    fn database_comes_from_db_vars() {
        let source = production()
            .with_var("DB_NAME", "app")
            .with_var("DB_USER", "admin")
            .with_var("DB_PASS", "hunter2")
            .with_var("DB_HOST", "db.internal");
        let config = resolve(&source, RunMode::Standard).unwrap();

        assert_eq!(
            config.database,
            DatabaseParams::postgres("app", "admin", "hunter2", "db.internal")
        );
    }

    #[test]
    fn test_mode_swaps_in_embedded_database() {
        let source = production()
            .with_var("DB_NAME", "app")
            .with_var("DB_HOST", "db.internal");
        let config = resolve(&source, RunMode::Test).unwrap();

        assert_eq!(config.database.name, "test_database");
        assert_eq!(config.database.engine, DatabaseEngine::Sqlite3);
        assert_eq!(config.database.options.timeout, Some(20));
        assert_eq!(config.database.host, "");
    }

    #[test]
    fn test_mode_does_not_relax_secret_key_check() {
        let source = EnvSource::new().with_var("ENV_NAME", "PROD");
        assert!(resolve(&source, RunMode::Test).is_err());
    }

    #[test]
    fn resolution_is_idempotent() {
        let source = production()
            .with_var("ALLOWED_HOSTS", "api.example.com")
            .with_var("DB_NAME", "app");
        let first = resolve(&source, RunMode::Standard).unwrap();
        let second = resolve(&source, RunMode::Standard).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn pass_through_strings_are_not_validated() {
        let source = EnvSource::new()
            .with_var("APP_NAME", "Inventory")
            .with_var("APP_DESCRIPTION", "")
            .with_var("LOG_LEVEL", "not a level");
        let config = resolve(&source, RunMode::Standard).unwrap();

        assert_eq!(config.app_name, "Inventory");
        assert_eq!(config.app_description, "");
        assert_eq!(config.log_level, "not a level");
    }

    #[test]
    fn log_format_parsing() {
        assert_eq!(LogFormat::from_env_str("json"), LogFormat::Json);
        assert_eq!(LogFormat::from_env_str(" JSON "), LogFormat::Json);
        assert_eq!(LogFormat::from_env_str("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::from_env_str("xml"), LogFormat::Pretty);
    }

    #[test]
    fn listen_addr_from_host_and_port() {
        let source = EnvSource::new()
            .with_var("HOST", "127.0.0.1")
            .with_var("PORT", "9000");
        let config = resolve(&source, RunMode::Standard).unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:9000".parse().unwrap());
    }

    #[test]
    fn invalid_port_is_rejected() {
        let source = EnvSource::new().with_var("PORT", "eighty");
        assert!(matches!(
            resolve(&source, RunMode::Standard),
            Err(ConfigError::InvalidValue { var: "PORT", .. })
        ));
    }

    #[test]
    fn invalid_host_is_rejected() {
        let source = EnvSource::new().with_var("HOST", "localhost");
        assert!(matches!(
            resolve(&source, RunMode::Standard),
            Err(ConfigError::InvalidValue { var: "HOST", .. })
        ));
    }

    #[test]
    fn debug_and_summary_hide_secrets() {
        let source = production()
            .with_var("ALLOWED_HOSTS", "api.example.com")
            .with_var("DB_PASS", "hunter2");
        let config = resolve(&source, RunMode::Standard).unwrap();

        let debug = format!("{config:?}");
        assert!(!debug.contains(CUSTOM_KEY));
        assert!(!debug.contains("hunter2"));

        let summary = serde_json::to_string(&config.summary()).unwrap();
        assert!(!summary.contains(CUSTOM_KEY));
        assert!(!summary.contains("hunter2"));
        assert!(summary.contains(r#""environment":"PROD""#));
        assert!(summary.contains(r#""database_engine":"postgresql""#));
    }

    #[test]
    fn summary_reports_password_presence_and_description() {
        let source = production()
            .with_var("APP_DESCRIPTION", "Stock levels")
            .with_var("DB_PASS", "hunter2");
        let summary = resolve(&source, RunMode::Standard).unwrap().summary();
        assert!(summary.database_password_set);
        assert_eq!(summary.app_description, "Stock levels");

        let summary = resolve(&production(), RunMode::Standard)
            .unwrap()
            .summary();
        assert!(!summary.database_password_set);
        assert_eq!(summary.app_description, "django base app");
    }

    #[test]
    fn override_file_beats_process_snapshot() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join(".env");
        std::fs::write(&path, "ENV_NAME=DEV\nDB_NAME=from_file\n").unwrap();

        let source = EnvSource::new()
            .with_var("ENV_NAME", "PROD")
            .with_var("DB_NAME", "from_process")
            .overlay_file(&path)
            .unwrap();
        let config = resolve(&source, RunMode::Standard).unwrap();

        assert_eq!(config.environment_name, "DEV");
        assert_eq!(config.database.name, "from_file");
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Tracing subscriber setup driven by the resolved configuration.

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, ResolvedConfig, DEFAULT_LOG_LEVEL};

/// Filter for the configured level; invalid directives fall back to `info`.
pub fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Install the global subscriber writing to stderr. Later calls are ignored.
///
/// Stdout is reserved for command output such as `--check`.
pub fn init(config: &ResolvedConfig) {
    let filter = env_filter(&config.log_level);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let result = match config.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

/// Log startup warnings about the resolved configuration.
pub fn report_startup(config: &ResolvedConfig) {
    tracing::info!(
        environment = %config.environment_name,
        debug = config.debug,
        database_engine = %config.database.engine,
        listen_addr = %config.listen_addr,
        "Configuration resolved"
    );

    if config.uses_default_secret_key() {
        tracing::warn!("Using the default secret key; set SECRET_KEY before deploying");
    }

    if config.allowed_hosts_deny_all() {
        tracing::warn!(
            "ALLOWED_HOSTS is empty outside debug mode; every request will be rejected"
        );
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Command-line entry point.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{
    resolve, ConfigError, EnvSource, ResolvedConfig, RunMode, OVERRIDE_FILE_NAME,
};

#[derive(Debug, Parser)]
#[command(
    name = "base-app-server",
    version,
    about = "Web backend with environment-driven configuration"
)]
pub struct Cli {
    /// Override file layered over the process environment [default: ./.env]
    #[arg(long, value_name = "PATH", conflicts_with = "no_env_file")]
    pub env_file: Option<PathBuf>,

    /// Do not load an override file.
    #[arg(long)]
    pub no_env_file: bool,

    /// Use the embedded test database instead of PostgreSQL.
    #[arg(long)]
    pub test_mode: bool,

    /// Resolve the configuration, print a redacted summary and exit.
    #[arg(long)]
    pub check: bool,
}

impl Cli {
    pub fn run_mode(&self) -> RunMode {
        if self.test_mode {
            RunMode::Test
        } else {
            RunMode::Standard
        }
    }

    /// Override file to load, if any.
    pub fn override_file(&self) -> Option<PathBuf> {
        if self.no_env_file {
            return None;
        }
        if let Some(path) = &self.env_file {
            return Some(path.clone());
        }
        let path = std::env::current_dir()
            .map(|dir| dir.join(OVERRIDE_FILE_NAME))
            .unwrap_or_else(|_| PathBuf::from(OVERRIDE_FILE_NAME));
        Some(path)
    }

    /// Snapshot the environment, layer the override file and resolve.
    pub fn load_config(&self) -> Result<ResolvedConfig, ConfigError> {
        let mut source = EnvSource::from_process();
        if let Some(path) = self.override_file() {
            source = source.overlay_file(path)?;
        }
        resolve(&source, self.run_mode())
    }
}

/// `--check` output: the redacted summary as pretty JSON, nothing else.
pub fn render_summary(config: &ResolvedConfig) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&config.summary())
}

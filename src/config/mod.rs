// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application, and the resolver that turns them into a
//! validated [`ResolvedConfig`]. Configuration is resolved once at startup
//! from an explicit [`EnvSource`] snapshot; nothing here reads or mutates the
//! process environment after the snapshot is taken.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `ENV_NAME` | Deployment label; `DEV` enables debug mode | `DEV` |
//! | `SECRET_KEY` | Application secret | insecure literal, rejected outside `DEV` |
//! | `ALLOWED_HOSTS` | Comma-separated host allowlist (ignored in debug) | empty |
//! | `DB_NAME` | PostgreSQL database name | empty |
//! | `DB_USER` | PostgreSQL user | empty |
//! | `DB_PASS` | PostgreSQL password | empty |
//! | `DB_HOST` | PostgreSQL host | empty |
//! | `APP_NAME` | Title shown in the API docs | `django base app` |
//! | `APP_DESCRIPTION` | Description shown in the API docs | `django base app` |
//! | `LOG_LEVEL` | Log filter directive | `info` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//!
//! Values from the `.env` override file in the working directory take
//! precedence over the process environment.

mod database;
mod error;
mod resolve;
mod source;

pub use database::{DatabaseEngine, DatabaseOptions, DatabaseParams};
pub use error::ConfigError;
pub use resolve::{
    resolve, ConfigSummary, LogFormat, ResolvedConfig, RunMode, WILDCARD_HOST,
};
pub use source::EnvSource;

pub const ENV_NAME_ENV: &str = "ENV_NAME";
pub const SECRET_KEY_ENV: &str = "SECRET_KEY";
pub const ALLOWED_HOSTS_ENV: &str = "ALLOWED_HOSTS";
pub const DB_NAME_ENV: &str = "DB_NAME";
pub const DB_USER_ENV: &str = "DB_USER";
pub const DB_PASS_ENV: &str = "DB_PASS";
pub const DB_HOST_ENV: &str = "DB_HOST";
pub const APP_NAME_ENV: &str = "APP_NAME";
pub const APP_DESCRIPTION_ENV: &str = "APP_DESCRIPTION";
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";

/// Environment label that enables debug mode and the wildcard host allowance.
pub const DEV_ENVIRONMENT: &str = "DEV";

/// Fallback secret key used when `SECRET_KEY` is unset.
///
/// # Security
/// Only acceptable under [`DEV_ENVIRONMENT`]. Resolution fails for any other
/// environment label while this value is in effect.
pub const INSECURE_DEFAULT_SECRET_KEY: &str =
    "django-insecure-dca8=1qpcbj*8!97yxaihy8!(0#*f)uosxqrsh&3oy)44&s$m6";

pub const DEFAULT_APP_NAME: &str = "django base app";
pub const DEFAULT_APP_DESCRIPTION: &str = "django base app";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Name of the override file looked up in the working directory.
pub const OVERRIDE_FILE_NAME: &str = ".env";

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while resolving configuration.
///
/// Every variant is fatal: the process must not bind a listener once one of
/// these is returned.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The built-in secret key is in effect outside the development label.
    #[error(
        "can't use the default secret key outside the DEV environment \
         (ENV_NAME={environment}); set SECRET_KEY"
    )]
    InsecureSecretKey { environment: String },

    /// The override file exists but could not be read or parsed.
    #[error("failed to load override file {}: {source}", path.display())]
    OverrideFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    /// A variable is set to a value that cannot be used.
    #[error("invalid value for {var}: {message}")]
    InvalidValue { var: &'static str, message: String },
}

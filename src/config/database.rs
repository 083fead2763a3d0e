// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Database connection parameters.

use std::fmt;

use serde::Serialize;

/// Port used for the primary PostgreSQL backend.
pub const POSTGRES_PORT: u16 = 5432;

/// Database name used by the embedded backend in test run mode.
pub const TEST_DATABASE_NAME: &str = "test_database";

/// Lock timeout (seconds) for the embedded test backend.
pub const TEST_DATABASE_TIMEOUT_SECS: u32 = 20;

/// Storage backend the ORM layer should connect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseEngine {
    /// Primary relational backend.
    Postgresql,
    /// Embedded file-backed backend used for test runs.
    Sqlite3,
}

impl fmt::Display for DatabaseEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseEngine::Postgresql => write!(f, "postgresql"),
            DatabaseEngine::Sqlite3 => write!(f, "sqlite3"),
        }
    }
}

/// Backend-specific connection options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatabaseOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
}

/// Resolved database connection parameters.
///
/// `Debug` redacts the password.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseParams {
    pub engine: DatabaseEngine,
    pub name: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: Option<u16>,
    pub options: DatabaseOptions,
}

impl DatabaseParams {
    /// PostgreSQL parameters on the fixed port.
    pub fn postgres(
        name: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        Self {
            engine: DatabaseEngine::Postgresql,
            name: name.into(),
            user: user.into(),
            password: password.into(),
            host: host.into(),
            port: Some(POSTGRES_PORT),
            options: DatabaseOptions::default(),
        }
    }

    /// Embedded backend used when running the test suite.
    pub fn test_database() -> Self {
        Self {
            engine: DatabaseEngine::Sqlite3,
            name: TEST_DATABASE_NAME.to_string(),
            user: String::new(),
            password: String::new(),
            host: String::new(),
            port: None,
            options: DatabaseOptions {
                timeout: Some(TEST_DATABASE_TIMEOUT_SECS),
            },
        }
    }

    /// Whether a password is configured.
    pub fn has_password(&self) -> bool {
        !self.password.is_empty()
    }
}

impl fmt::Debug for DatabaseParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseParams")
            .field("engine", &self.engine)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("options", &self.options)
            .finish()
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Immutable environment snapshots.
//!
//! The resolver reads from an [`EnvSource`] instead of `std::env`, so the
//! same snapshot always resolves to the same configuration and tests never
//! touch process state.

use std::collections::BTreeMap;
use std::path::Path;

use super::ConfigError;

/// Snapshot of environment variables used as resolver input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSource {
    vars: BTreeMap<String, String>,
}

impl EnvSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current process environment.
    ///
    /// Entries whose name or value is not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    /// Add or replace a single variable.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Layer a dotenv-style file over this snapshot.
    ///
    /// Entries from the file replace existing entries with the same name.
    /// A missing file leaves the snapshot unchanged.
    ///
    /// `${VAR}` references inside the file are expanded by `dotenvy` against
    /// the process environment, not against this snapshot.
    pub fn overlay_file(mut self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let to_error = |source: dotenvy::Error| ConfigError::OverrideFile {
            path: path.to_path_buf(),
            source,
        };

        let entries = match dotenvy::from_path_iter(path) {
            Ok(entries) => entries,
            Err(e) if e.not_found() => return Ok(self),
            Err(e) => return Err(to_error(e)),
        };

        for entry in entries {
            let (key, value) = entry.map_err(to_error)?;
            self.vars.insert(key, value);
        }

        Ok(self)
    }

    /// Look up a variable.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Look up a variable, falling back to `default` when unset.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }
}

impl<K, V> FromIterator<(K, V)> for EnvSource
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::config::ResolvedConfig;

/// Shared state handed to every handler. The configuration is read-only
/// once the server starts.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ResolvedConfig>,
}

impl AppState {
    pub fn new(config: ResolvedConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Base App Server - environment-driven web backend bootstrap
//!
//! This crate resolves the service's runtime configuration from an
//! environment snapshot (plus an optional `.env` override file), refuses to
//! start with the insecure default secret key outside development, and
//! serves health and API documentation endpoints behind an allowed-hosts
//! guard.
//!
//! ## Modules
//!
//! - `config` - Environment snapshot, resolver and validation
//! - `api` - HTTP routes, OpenAPI document and host guard (Axum)
//! - `cli` - Command-line flags (override file, test run mode, check)
//! - `logging` - Tracing subscriber setup

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod state;

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Allowed-hosts guard.
//!
//! Every request must carry a host that matches one of the resolved
//! `allowed_hosts` entries:
//!
//! - `*` matches any host, including a missing one.
//! - `.example.com` matches `example.com` and any subdomain of it.
//! - Anything else is an exact, case-insensitive match.
//!
//! Empty entries never match, so an unset `ALLOWED_HOSTS` outside debug mode
//! rejects everything.

use axum::{
    extract::{Request, State},
    http::header::HOST,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::WILDCARD_HOST;
use crate::error::ApiError;
use crate::state::AppState;

/// Middleware rejecting requests whose host is not allowlisted.
pub async fn enforce_allowed_hosts(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if state.config.allows_any_host() {
        return next.run(request).await;
    }

    let host = match request_host(&request) {
        Some(host) => host,
        None => return ApiError::invalid_host(None).into_response(),
    };

    if is_allowed_host(&host, &state.config.allowed_hosts) {
        next.run(request).await
    } else {
        tracing::warn!(
            host = %host,
            path = %request.uri().path(),
            "Rejected request for disallowed host"
        );
        ApiError::invalid_host(Some(&host)).into_response()
    }
}

/// Host the request was addressed to, normalized for matching.
fn request_host(request: &Request) -> Option<String> {
    let raw = match request.headers().get(HOST) {
        Some(value) => value.to_str().ok()?,
        None => request.uri().host()?,
    };
    let host = normalize_host(raw);
    (!host.is_empty()).then_some(host)
}

/// Lower-case a host and drop any port and trailing dot.
pub fn normalize_host(raw: &str) -> String {
    let host = raw.trim().to_ascii_lowercase();
    let domain = if host.ends_with(']') {
        host.as_str()
    } else {
        host.rsplit_once(':').map_or(host.as_str(), |(domain, _)| domain)
    };
    domain.trim_end_matches('.').to_string()
}

/// Check a normalized host against allowlist patterns.
pub fn is_allowed_host(host: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| {
        let pattern = pattern.trim().to_ascii_lowercase();
        if pattern.is_empty() {
            false
        } else if pattern == WILDCARD_HOST {
            true
        } else if let Some(domain) = pattern.strip_prefix('.') {
            host == domain || host.ends_with(pattern.as_str())
        } else {
            host == pattern
        }
    })
}

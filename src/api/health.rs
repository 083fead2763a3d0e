// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Health check response with the active configuration profile.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    /// Overall health status ("ok").
    pub status: String,
    /// Active environment label (`ENV_NAME`).
    pub environment: String,
    /// Whether debug mode is enabled.
    pub debug: bool,
    /// Database backend the service was configured for.
    pub database_engine: String,
}

/// Simple health check response for liveness probes.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Health check endpoint handler.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthStatus)
    )
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    let config = &state.config;
    Json(HealthStatus {
        status: "ok".to_string(),
        environment: config.environment_name.clone(),
        debug: config.debug,
        database_engine: config.database.engine.to_string(),
    })
}

/// Liveness probe handler.
///
/// Always returns 200 if the process is running.
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn liveness() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

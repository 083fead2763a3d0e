// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::ResolvedConfig, error::ApiError, state::AppState};

pub mod health;
pub mod hosts;

/// Name of the token security scheme in the OpenAPI document.
pub const TOKEN_SECURITY_SCHEME: &str = "Token";

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .with_state(state.clone());

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", api_doc(&state.config)))
        .fallback(route_not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn_with_state(
            state,
            hosts::enforce_allowed_hosts,
        ))
}

async fn route_not_found() -> ApiError {
    ApiError::not_found("route not found")
}

/// OpenAPI document titled with the configured application name.
pub fn api_doc(config: &ResolvedConfig) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = config.app_name.clone();
    doc.info.description = Some(config.app_description.clone());
    doc
}

/// Declares the `Authorization: Token <token>` API key scheme.
struct TokenSecurity;

impl Modify for TokenSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            TOKEN_SECURITY_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "Authorization",
                "Token-based authentication using the format: Token <your-token>",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health::health, health::liveness),
    components(schemas(health::HealthStatus, health::HealthResponse)),
    modifiers(&TokenSecurity),
    tags(
        (name = "Health", description = "Service health probes")
    )
)]
struct ApiDoc;

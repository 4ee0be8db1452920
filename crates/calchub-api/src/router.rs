//! Route definitions for the CalcHub HTTP API.
//!
//! REST routes are mounted under `/api`; the WebSocket upgrade lives at
//! `/ws`. The router receives `AppState` and passes it to all handlers
//! via Axum's `State` extractor.

use axum::http::HeaderValue;
use axum::routing::{delete, get, patch, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use calchub_core::config::server::CorsConfig;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(catalog_routes())
        .merge(audit_routes())
        .merge(health_routes());

    let ws_routes = Router::new().route("/ws", get(handlers::ws::ws_upgrade));

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .merge(ws_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Catalog tree, categories, calculators, versioning
fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/catalog/tree", get(handlers::catalog::get_tree))
        .route("/catalog/categories", post(handlers::catalog::create_category))
        .route(
            "/catalog/categories/reorder",
            post(handlers::catalog::reorder_categories),
        )
        .route(
            "/catalog/categories/{id}",
            patch(handlers::catalog::update_category),
        )
        .route(
            "/catalog/categories/{id}",
            delete(handlers::catalog::delete_category),
        )
        .route("/catalog/calculators", post(handlers::catalog::create_calculator))
        .route(
            "/catalog/calculators/reorder",
            post(handlers::catalog::reorder_calculators),
        )
        .route("/catalog/calculators/{id}", get(handlers::catalog::get_calculator))
        .route(
            "/catalog/calculators/{id}",
            patch(handlers::catalog::update_calculator),
        )
        .route(
            "/catalog/calculators/{id}",
            delete(handlers::catalog::delete_calculator),
        )
        .route(
            "/catalog/calculators/{id}/versions",
            get(handlers::catalog::list_versions),
        )
        .route(
            "/catalog/calculators/{id}/versions",
            post(handlers::catalog::create_version),
        )
        .route(
            "/catalog/calculators/{id}/rollback/{version_id}",
            post(handlers::catalog::rollback),
        )
}

/// Audit trail listing
fn audit_routes() -> Router<AppState> {
    Router::new().route("/audit", get(handlers::audit::list_recent))
}

/// Liveness endpoint
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

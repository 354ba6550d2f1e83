//! Read-only HTTP surface over a validated [`Registry`].

pub mod api;
pub mod config;

use axum::{routing::get, Extension, Json, Router};
use chinook_db::DbPool;
use chinook_registry::Registry;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
    /// Entity declarations, already validated against the pool's schema.
    pub registry: Arc<Registry>,
}

/// Builds the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/schema", get(api::get_schema_handler))
        .route("/api/entities/{entity}", get(api::list_records_handler))
        .route("/api/entities/{entity}/{key}", get(api::get_record_handler))
        .route(
            "/api/entities/{entity}/{key}/{relation}",
            get(api::traverse_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

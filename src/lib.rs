//! Weekly five-bullet journal API.
//!
//! Library half of the crate: the router and its state, shared by the
//! server binary, the `seed-demo` tool and the integration tests.

use std::sync::Arc;

use axum::{
    http::{header, Method},
    routing::{delete, get, post, put},
    Router,
};
use sqlx::SqlitePool;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

use config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<Config>,
}

/// Build the full application. Every route is reachable both at the root and
/// under `/api`, which is where the web client points.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        // Entries
        .route("/entries", get(handlers::entries::list_entries))
        .route("/entries", post(handlers::entries::create_entry))
        .route("/entries/current", get(handlers::entries::get_current_entry))
        .route(
            "/entries/week/:date",
            get(handlers::entries::get_entry_by_week),
        )
        .route("/entries/:id", get(handlers::entries::get_entry))
        .route("/entries/:id", put(handlers::entries::update_entry))
        .route("/entries/:id", delete(handlers::entries::delete_entry))
        // Insights
        .route(
            "/entries/:id/insight",
            get(handlers::insights::get_insight),
        )
        // Streak
        .route("/streak", get(handlers::streak::get_streak));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .merge(api.clone())
        .nest("/api", api)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

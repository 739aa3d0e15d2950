pub mod auth;
pub mod config;
pub mod db;
pub mod deadline;
pub mod error;
pub mod models;
pub mod routes;
pub mod service;
pub mod state;

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::service::AuthService;
use crate::state::{AppState, SharedState};

pub fn build_app(pool: PgPool, config: Config) -> Router {
    let state: SharedState = Arc::new(AppState {
        config,
        auth: AuthService::new(pool),
    });

    Router::new()
        .merge(routes::rpc_routes())
        .route("/health", axum::routing::get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

//! HTTP surface: dashboard, screener API, health and alert status.

pub mod dashboard;
pub mod monitor;
pub mod screener;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::SharedState;

/// Build the full router with middleware attached.
pub fn router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // ── Dashboard ─────────────────────────────────────────────────────────
        .route("/",                   get(dashboard::index))
        // ── Screener ──────────────────────────────────────────────────────────
        .route("/api/screener",       get(screener::get_screener))
        // ── Monitoring ────────────────────────────────────────────────────────
        .route("/api/alerts/status",  get(monitor::get_alert_status))
        .route("/health",             get(monitor::health))
        // ── Middleware ────────────────────────────────────────────────────────
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

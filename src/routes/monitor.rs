//! # routes::monitor
//!
//! | Method | Path                 | Description                          |
//! |--------|----------------------|--------------------------------------|
//! | GET    | `/health`            | Liveness probe                       |
//! | GET    | `/api/alerts/status` | Alert loop / notifier / ledger state |

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use std::sync::atomic::Ordering;

use crate::error::AppError;
use crate::state::SharedState;

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

/// GET /api/alerts/status — read-only view of the alerting side.
///
/// An unreadable ledger is reported here even though the dispatcher would
/// start over from empty.
pub async fn get_alert_status(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, AppError> {
    let ledger_size = state.dispatcher.ledger_size().await?;

    Ok(Json(json!({
        "ok":                  true,
        "alerts_enabled":      state.config.alerts_enabled,
        "notifier_configured": state.dispatcher.is_configured(),
        "ledger_size":         ledger_size,
        "universe_size":       state.universe.len(),
        "scan_count":          state.scan_count.load(Ordering::Relaxed),
        "alert_count":         state.alert_count.load(Ordering::Relaxed),
    })))
}

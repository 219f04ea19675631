//! # routes::screener
//!
//! | Method | Path            | Description                                |
//! |--------|-----------------|--------------------------------------------|
//! | GET    | `/api/screener` | Run a scan and return admitted snapshots   |
//!
//! ### Query parameters (all optional)
//! `session` = `AUTO` | `PRE` | `REG` | `POST`, plus any of `price_min`,
//! `price_max`, `pct_min_regular`, `pct_min_premarket`, `vol_min_regular`,
//! `vol_min_premarket`, `mktcap_max`. Unparseable values are ignored.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use std::collections::HashMap;
use std::sync::atomic::Ordering;

use crate::models::{SessionChoice, Thresholds};
use crate::state::SharedState;

/// GET /api/screener — JSON array ordered by % change, descending.
pub async fn get_screener(
    State(state): State<SharedState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let choice = SessionChoice::parse(params.get("session").map(String::as_str));
    let limits = Thresholds::DEFAULT.with_overrides(&params);

    let results = state.scanner.scan(&state.universe, choice, &limits).await;
    state.scan_count.fetch_add(1, Ordering::Relaxed);

    Json(results)
}

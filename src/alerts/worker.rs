//! # alerts::worker — Periodic Alert Loop
//!
//! ```text
//! every ALERT_INTERVAL_SECS:
//!   1. Resolve the session once (AUTO)
//!   2. Scan the universe with default thresholds
//!   3. Dispatch new alerts
//! ```

use std::sync::atomic::Ordering;
use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::engine::session;
use crate::models::{SessionChoice, Thresholds};
use crate::state::SharedState;

/// Run forever. Spawned from `main` only when alerts are enabled.
pub async fn run_alert_loop(state: SharedState) {
    let period = state.config.alert_interval;
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(interval = ?period, tickers = state.universe.len(), "⏰ Alert loop started");

    loop {
        ticker.tick().await;
        let sent = run_cycle(&state).await;
        info!(sent, "Alert cycle finished");
    }
}

/// One scan + dispatch pass. Returns the number of alerts sent.
pub async fn run_cycle(state: &SharedState) -> usize {
    let session = session::resolve(SessionChoice::Auto, state.scanner.timezone());

    let results = state
        .scanner
        .scan_session(&state.universe, session, &Thresholds::DEFAULT)
        .await;
    state.scan_count.fetch_add(1, Ordering::Relaxed);

    let sent = state.dispatcher.dispatch(&results, session).await;
    state.alert_count.fetch_add(sent as u64, Ordering::Relaxed);
    sent
}

//! # engine::filter
//!
//! **Filter** — the admit/reject gate every fetched snapshot goes through.
//!
//! ```text
//! snapshot
//!     │
//!     ├─ price or % change missing?           → reject
//!     ├─ [1] price in [price_min, price_max]
//!     ├─ [2] % change ≥ session minimum        (REG vs PRE/POST)
//!     ├─ [3] volume (missing = 0) ≥ session minimum
//!     └─ [4] market cap missing or ≤ mktcap_max
//! ```
//!
//! A missing market cap never disqualifies: plenty of micro-caps have no cap
//! reported at all.

use tracing::trace;

use crate::models::{Session, Snapshot, Thresholds};

/// Outcome of [`evaluate`]. Reasons are for logs only.
#[derive(Debug, PartialEq)]
pub enum FilterResult {
    Admitted,
    Rejected { reason: &'static str },
}

pub fn evaluate(snap: &Snapshot, session: Session, limits: &Thresholds) -> FilterResult {
    let (Some(price), Some(pct)) = (snap.price, snap.percent_change) else {
        return FilterResult::Rejected { reason: "missing price or percent change" };
    };

    if !limits.price_in_range(price) {
        return FilterResult::Rejected { reason: "price out of range" };
    }

    if pct < limits.pct_min_for(session) {
        return FilterResult::Rejected { reason: "percent change below minimum" };
    }

    let volume = snap.volume.unwrap_or(0) as f64;
    if volume < limits.vol_min_for(session) {
        return FilterResult::Rejected { reason: "volume below minimum" };
    }

    if let Some(cap) = snap.market_cap {
        if cap > limits.mktcap_max {
            return FilterResult::Rejected { reason: "market cap above maximum" };
        }
    }

    FilterResult::Admitted
}

/// `true` iff the snapshot passes every check for `session`.
pub fn admits(snap: &Snapshot, session: Session, limits: &Thresholds) -> bool {
    match evaluate(snap, session, limits) {
        FilterResult::Admitted => true,
        FilterResult::Rejected { reason } => {
            trace!(ticker = %snap.ticker, %session, reason, "Filtered out");
            false
        }
    }
}

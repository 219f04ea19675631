//! # engine::scoring
//!
//! **Breakout score** — a bounded 0..=100 heuristic combining momentum and
//! volume anomaly.
//!
//! ```text
//!   clamp(percent_change, 0, 50)        × 1    ≤ 50
//! + clamp(relative_volume, 0, 3)        × 10   ≤ 30
//! + 10 if 0.50 ≤ price ≤ 2.00                  ≤ 10
//! ─────────────────────────────────────────────
//!   round, clamp to 0..=100
//! ```
//!
//! Missing inputs contribute 0, so every snapshot gets a score.

use crate::models::Snapshot;

const PCT_CAP: f64 = 50.0;
const REL_VOL_CAP: f64 = 3.0;
const REL_VOL_WEIGHT: f64 = 10.0;
const SWEET_SPOT: (f64, f64) = (0.50, 2.00);
const SWEET_SPOT_BONUS: f64 = 10.0;

pub fn breakout_score(snap: &Snapshot) -> u8 {
    let pct     = snap.percent_change.unwrap_or(0.0);
    let rel_vol = snap.relative_volume.unwrap_or(0.0);
    let price   = snap.price.unwrap_or(0.0);

    let mut score = pct.clamp(0.0, PCT_CAP) + rel_vol.clamp(0.0, REL_VOL_CAP) * REL_VOL_WEIGHT;

    if price >= SWEET_SPOT.0 && price <= SWEET_SPOT.1 {
        score += SWEET_SPOT_BONUS;
    }

    // NaN inputs would survive `clamp`; treat them as no contribution.
    if score.is_nan() {
        return 0;
    }

    score.round().clamp(0.0, 100.0) as u8
}

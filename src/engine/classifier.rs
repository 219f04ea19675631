//! # engine::classifier
//!
//! **Classifier** — turns a snapshot into BUY / WATCH / IGNORE.
//!
//! The price band is re-checked here so the classifier stays safe to call on
//! snapshots that never went through [`crate::engine::filter`].

use crate::engine::scoring::breakout_score;
use crate::models::{Signal, Snapshot, Thresholds};

pub const BUY_SCORE: u8 = 75;
pub const WATCH_SCORE: u8 = 55;

pub fn classify(snap: &Snapshot, limits: &Thresholds) -> Signal {
    let price = snap.price.unwrap_or(0.0);
    if !limits.price_in_range(price) {
        return Signal::Ignore;
    }

    let score   = breakout_score(snap);
    let rel_vol = snap.relative_volume.unwrap_or(0.0);

    if score >= BUY_SCORE && rel_vol >= limits.rel_vol_min {
        Signal::Buy
    } else if score >= WATCH_SCORE {
        Signal::Watch
    } else {
        Signal::Ignore
    }
}

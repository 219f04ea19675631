//! # models::snapshot
//!
//! Defines [`Snapshot`], one ticker's point-in-time quote as seen by a single
//! scan, together with the [`Signal`] label attached to admitted entries.
//!
//! A snapshot is built fresh from a provider [`Quote`] on every scan and is
//! never stored. Derived fields (`percent_change`, `relative_volume`) stay
//! `None` when their inputs are missing instead of collapsing to zero, so the
//! filter can tell "no data" apart from "flat".

use serde::Serialize;
use std::fmt;

use crate::market::Quote;
use crate::models::Session;

// ─── Signal ───────────────────────────────────────────────────────────────────

/// Final classification of an admitted snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    Buy,
    Watch,
    Ignore,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Signal::Buy => "BUY",
            Signal::Watch => "WATCH",
            Signal::Ignore => "IGNORE",
        })
    }
}

// ─── Snapshot ─────────────────────────────────────────────────────────────────

/// Serialized shape is the screener API row; absent values become `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Upper-case symbol, unique within one scan.
    pub ticker: String,

    /// Last traded price. `None` when the provider reported nothing usable.
    pub price: Option<f64>,

    #[serde(skip_serializing)]
    pub previous_close: Option<f64>,

    /// `(price - previous_close) / previous_close * 100`.
    pub percent_change: Option<f64>,

    pub volume: Option<u64>,

    pub market_cap: Option<f64>,

    /// Today's volume over the 10-day average volume.
    #[serde(rename = "rel_volume")]
    pub relative_volume: Option<f64>,

    /// Attached by the scanner for admitted snapshots only.
    pub signal: Option<Signal>,

    /// Attached by the scanner for admitted snapshots only. Always in `0..=100`.
    pub breakout_score: Option<u8>,

    pub session: Session,
}

impl Snapshot {
    /// Normalise a raw provider quote into a snapshot.
    ///
    /// Non-finite or non-positive prices are treated as absent; negative
    /// volume / market cap likewise. Relative volume needs a positive
    /// average.
    pub fn from_quote(ticker: &str, session: Session, quote: &Quote) -> Self {
        let price          = quote.last_price.filter(|p| p.is_finite() && *p > 0.0);
        let previous_close = quote.previous_close.filter(|p| p.is_finite() && *p > 0.0);
        let volume         = quote.volume.filter(|v| v.is_finite() && *v >= 0.0);
        let market_cap     = quote.market_cap.filter(|c| c.is_finite() && *c >= 0.0);
        let avg_volume     = quote.avg_volume_10d.filter(|v| v.is_finite() && *v > 0.0);

        let percent_change = match (price, previous_close) {
            (Some(last), Some(prev)) => Some((last - prev) / prev * 100.0),
            _ => None,
        };

        let relative_volume = match (volume, avg_volume) {
            (Some(vol), Some(avg)) => Some(vol / avg),
            _ => None,
        };

        Self {
            ticker: ticker.trim().to_uppercase(),
            price,
            previous_close,
            percent_change,
            volume: volume.map(|v| v as u64),
            market_cap,
            relative_volume,
            signal: None,
            breakout_score: None,
            session,
        }
    }

    /// Consume the snapshot and return it with its classification attached.
    pub fn classified(self, signal: Signal, breakout_score: u8) -> Self {
        Self {
            signal: Some(signal),
            breakout_score: Some(breakout_score),
            ..self
        }
    }
}

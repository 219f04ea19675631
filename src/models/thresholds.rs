//! # models::thresholds
//!
//! Defines [`Thresholds`], the screening limits applied by one scan.
//!
//! The documented defaults are a `const`; a request never mutates them, it
//! gets its own copy via [`Thresholds::with_overrides`]. Concurrent scans with
//! different overrides therefore can't leak into each other.

use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use crate::models::Session;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    pub price_min:         f64,
    pub price_max:         f64,
    /// Minimum % move during regular hours.
    pub pct_min_regular:   f64,
    /// Minimum % move in any non-regular session.
    pub pct_min_premarket: f64,
    pub vol_min_regular:   f64,
    pub vol_min_premarket: f64,
    pub mktcap_max:        f64,
    /// Relative volume required for a BUY.
    pub rel_vol_min:       f64,
}

impl Thresholds {
    pub const DEFAULT: Thresholds = Thresholds {
        price_min:         0.50,
        price_max:         3.00,
        pct_min_regular:   10.0,
        pct_min_premarket: 5.0,
        vol_min_regular:   500_000.0,
        vol_min_premarket: 100_000.0,
        mktcap_max:        300_000_000.0,
        rel_vol_min:       1.5,
    };

    /// Copy `self` and apply any recognised numeric overrides from `params`.
    /// Unknown keys and values that don't parse to a finite number are
    /// ignored.
    pub fn with_overrides(&self, params: &HashMap<String, String>) -> Thresholds {
        let mut out = *self;

        for (key, raw) in params {
            let Some(slot) = out.overridable_mut(key) else { continue };

            match raw.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => *slot = v,
                _ => debug!(key = %key, raw = %raw, "Ignoring malformed threshold override"),
            }
        }

        out
    }

    /// Field a caller may override per request under `key`. `rel_vol_min`
    /// is not reachable from here.
    fn overridable_mut(&mut self, key: &str) -> Option<&mut f64> {
        match key {
            "price_min"         => Some(&mut self.price_min),
            "price_max"         => Some(&mut self.price_max),
            "pct_min_regular"   => Some(&mut self.pct_min_regular),
            "pct_min_premarket" => Some(&mut self.pct_min_premarket),
            "vol_min_regular"   => Some(&mut self.vol_min_regular),
            "vol_min_premarket" => Some(&mut self.vol_min_premarket),
            "mktcap_max"        => Some(&mut self.mktcap_max),
            _ => None,
        }
    }

    /// Returns `true` if `price` lies in `[price_min, price_max]`.
    #[inline]
    pub fn price_in_range(&self, price: f64) -> bool {
        price >= self.price_min && price <= self.price_max
    }

    /// Minimum % change for `session`. Only REG uses the regular limit.
    #[inline]
    pub fn pct_min_for(&self, session: Session) -> f64 {
        match session {
            Session::Reg => self.pct_min_regular,
            Session::Pre | Session::Post => self.pct_min_premarket,
        }
    }

    #[inline]
    pub fn vol_min_for(&self, session: Session) -> f64 {
        match session {
            Session::Reg => self.vol_min_regular,
            Session::Pre | Session::Post => self.vol_min_premarket,
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

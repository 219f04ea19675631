//! # market — Quote Provider & Snapshot Fetcher
//!
//! The provider is a black box behind [`QuoteProvider`]: give it a symbol,
//! get back whatever quote fields it has. [`fetch_snapshot`] is the only
//! thing the scanner calls; it never fails; a provider error just means
//! "skip this ticker for this scan".

mod yahoo;

pub use yahoo::YahooQuoteProvider;

use async_trait::async_trait;
use tracing::debug;

use crate::error::FetchError;
use crate::models::{Session, Snapshot};

// ─── Quote ────────────────────────────────────────────────────────────────────

/// Raw provider fields for one symbol. Every field is optional; providers
/// routinely omit market cap or averages for thinly traded names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Quote {
    pub last_price:     Option<f64>,
    pub previous_close: Option<f64>,
    pub volume:         Option<f64>,
    pub market_cap:     Option<f64>,
    /// Rolling 10-day average volume.
    pub avg_volume_10d: Option<f64>,
}

// ─── Provider Trait ───────────────────────────────────────────────────────────

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Provider name for logs.
    fn name(&self) -> &'static str;

    /// Fetch the current quote for `ticker`. Implementations must bound the
    /// call with a timeout.
    async fn fetch_quote(&self, ticker: &str) -> Result<Quote, FetchError>;
}

// ─── Snapshot Fetcher ─────────────────────────────────────────────────────────

/// Fetch and normalise one ticker. `None` means "fetch failed or nothing
/// usable came back"; the reason is only logged.
pub async fn fetch_snapshot(
    provider: &dyn QuoteProvider,
    ticker:   &str,
    session:  Session,
) -> Option<Snapshot> {
    match provider.fetch_quote(ticker).await {
        Ok(quote) => Some(Snapshot::from_quote(ticker, session, &quote)),
        Err(e) => {
            debug!(ticker, provider = provider.name(), error = %e, "Quote fetch failed — skipping");
            None
        }
    }
}

//! # state
//!
//! The shared application state injected into every Axum handler and the
//! alert loop.
//!
//! Nothing here is mutated per request: thresholds are copied per call, the
//! scanner is stateless, and the only shared mutable resource (the alert
//! ledger) is owned by [`AlertDispatcher`] behind its own lock.

use anyhow::Context;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use crate::alerts::{AlertDispatcher, Notifier, TelegramNotifier};
use crate::config::Config;
use crate::engine::Scanner;
use crate::market::{QuoteProvider, YahooQuoteProvider};

// ─── AppState ─────────────────────────────────────────────────────────────────

pub struct AppState {
    pub config:     Arc<Config>,
    /// Normalised, de-duplicated ticker list loaded at startup.
    pub universe:   Arc<Vec<String>>,
    pub scanner:    Arc<Scanner>,
    pub dispatcher: Arc<AlertDispatcher>,

    // ── Metrics ───────────────────────────────────────────────────────────────
    pub scan_count:  Arc<AtomicU64>,
    pub alert_count: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(
        config:   Config,
        universe: Vec<String>,
        provider: Arc<dyn QuoteProvider>,
        notifier: Option<Arc<dyn Notifier>>,
    ) -> Self {
        let scanner = Scanner::new(provider, config.scan_pace, config.timezone);
        let dispatcher = AlertDispatcher::new(
            notifier,
            config.alert_state_path.clone(),
            config.alert_send_delay,
            config.timezone,
        );

        Self {
            config:      Arc::new(config),
            universe:    Arc::new(universe),
            scanner:     Arc::new(scanner),
            dispatcher:  Arc::new(dispatcher),
            scan_count:  Arc::new(AtomicU64::new(0)),
            alert_count: Arc::new(AtomicU64::new(0)),
        }
    }
}

/// Convenience type alias
pub type SharedState = Arc<AppState>;

/// Wire the production provider and notifier from `config`.
pub fn build_state(config: Config, universe: Vec<String>) -> anyhow::Result<SharedState> {
    let provider = YahooQuoteProvider::new(&config.quote_base_url, config.quote_timeout)
        .context("Failed to build quote provider HTTP client")?;

    let notifier: Option<Arc<dyn Notifier>> = match &config.telegram {
        Some(tg) => Some(Arc::new(
            TelegramNotifier::new(&tg.api_url, &tg.token, &tg.chat_id)
                .context("Failed to build Telegram HTTP client")?,
        )),
        None => None,
    };

    Ok(Arc::new(AppState::new(config, universe, Arc::new(provider), notifier)))
}

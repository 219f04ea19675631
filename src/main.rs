//! # PennyGems — Penny-Stock Breakout Screener
//!
//! ## Architecture Overview
//!
//! ```text
//!  ┌──────────────┐  GET /api/screener    ┌───────────────────────────────┐
//!  │  Dashboard   │ ─────────────────────▶│ AppState                      │
//!  │  (GET /)     │ ◀──── JSON rows ───── │ ├─ universe                   │
//!  └──────────────┘                       │ ├─ scanner ──▶ QuoteProvider  │──▶ Yahoo
//!                                         │ └─ dispatcher ─▶ Notifier     │──▶ Telegram
//!  ┌──────────────┐  every N seconds      │        └─ alert ledger (file) │
//!  │ Alert Loop   │ ─────────────────────▶│                               │
//!  └──────────────┘  scan + dispatch      └───────────────────────────────┘
//! ```
//!
//! See [`config`] for the environment variables.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod alerts;
mod config;
mod engine;
mod error;
mod market;
mod models;
mod routes;
mod state;
mod universe;

use config::Config;
use state::build_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Load .env (optional — prod can use real env vars) ─────────────────
    dotenvy::dotenv().ok();

    // ── 2. Structured logging ─────────────────────────────────────────────────
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("pennygems=debug".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    info!(r#"

  ╔═══════════════════════════════════════════════╗
  ║        PENNYGEMS — Breakout Screener          ║
  ║        Scan · Score · Classify · Alert        ║
  ╚═══════════════════════════════════════════════╝"#);

    // ── 3. Config + universe ──────────────────────────────────────────────────
    let config = Config::from_env().context("Failed to load config")?;
    let universe = universe::load_universe(&config.universe_path)?;

    info!(
        tickers   = universe.len(),
        timezone  = %config.timezone,
        alerts    = config.alerts_enabled,
        notifier  = config.telegram.is_some(),
        ledger    = %config.alert_state_path.display(),
        "Configuration loaded"
    );

    // ── 4. Shared state ───────────────────────────────────────────────────────
    let addr = config.bind_addr;
    let alerts_enabled = config.alerts_enabled;
    let state = build_state(config, universe)?;

    // ── 5. Alert loop (opt-in) ────────────────────────────────────────────────
    if alerts_enabled {
        tokio::spawn(alerts::worker::run_alert_loop(state.clone()));
    }

    // ── 6. Bind & Serve ───────────────────────────────────────────────────────
    let app = routes::router(state);

    info!(?addr, "🚀 PennyGems server starting");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

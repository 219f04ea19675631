//! # config — Environment-sourced settings
//!
//! | Variable              | Default                            |
//! |-----------------------|------------------------------------|
//! | `BIND_ADDR`           | `0.0.0.0:7860`                     |
//! | `UNIVERSE_PATH`       | `symbols.csv`                      |
//! | `QUOTE_BASE_URL`      | `https://query1.finance.yahoo.com` |
//! | `QUOTE_TIMEOUT_SECS`  | `5`                                |
//! | `SCAN_PACE_MS`        | `50`                               |
//! | `MARKET_TIMEZONE`     | `America/New_York`                 |
//! | `ENABLE_ALERTS`       | `0`                                |
//! | `ALERT_INTERVAL_SECS` | `60`                               |
//! | `ALERT_SEND_DELAY_MS` | `200`                              |
//! | `ALERT_STATE_PATH`    | `alert_state.json`                 |
//! | `TG_BOT_TOKEN`        | unset                              |
//! | `TG_CHAT_ID`          | unset                              |
//! | `TELEGRAM_API_URL`    | `https://api.telegram.org`         |

use anyhow::{anyhow, Context};
use chrono_tz::Tz;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub api_url: String,
    pub token:   String,
    pub chat_id: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr:        SocketAddr,
    pub universe_path:    PathBuf,
    pub quote_base_url:   String,
    /// Upper bound on a single provider call.
    pub quote_timeout:    Duration,
    /// Delay between per-ticker fetches within one scan.
    pub scan_pace:        Duration,
    /// Session boundaries and the alert calendar day are taken in this zone.
    pub timezone:         Tz,
    pub alerts_enabled:   bool,
    pub alert_interval:   Duration,
    pub alert_send_delay: Duration,
    pub alert_state_path: PathBuf,
    /// `None` unless both token and chat id are set.
    pub telegram:         Option<TelegramConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr:        SocketAddr::from(([0, 0, 0, 0], 7860)),
            universe_path:    PathBuf::from("symbols.csv"),
            quote_base_url:   "https://query1.finance.yahoo.com".to_string(),
            quote_timeout:    Duration::from_secs(5),
            scan_pace:        Duration::from_millis(50),
            timezone:         chrono_tz::America::New_York,
            alerts_enabled:   false,
            alert_interval:   Duration::from_secs(60),
            alert_send_delay: Duration::from_millis(200),
            alert_state_path: PathBuf::from("alert_state.json"),
            telegram:         None,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr: SocketAddr = match get("BIND_ADDR") {
            Some(raw) => raw.parse().with_context(|| format!("BIND_ADDR is not a socket address: '{raw}'"))?,
            None => defaults.bind_addr,
        };

        let quote_timeout = match get("QUOTE_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.parse().context("QUOTE_TIMEOUT_SECS must be a number")?),
            None => defaults.quote_timeout,
        };

        let scan_pace = match get("SCAN_PACE_MS") {
            Some(raw) => Duration::from_millis(raw.parse().context("SCAN_PACE_MS must be a number")?),
            None => defaults.scan_pace,
        };

        let timezone = match get("MARKET_TIMEZONE") {
            Some(raw) => Tz::from_str(&raw)
                .map_err(|_| anyhow!("Invalid MARKET_TIMEZONE: '{raw}' (expected IANA tz like America/New_York)"))?,
            None => defaults.timezone,
        };

        let telegram = match (get("TG_BOT_TOKEN"), get("TG_CHAT_ID")) {
            (Some(token), Some(chat_id)) => Some(TelegramConfig {
                api_url: get("TELEGRAM_API_URL").unwrap_or_else(|| "https://api.telegram.org".to_string()),
                token,
                chat_id,
            }),
            _ => None,
        };

        let env_u64 = |key: &str, default: u64| get(key).and_then(|v| v.parse().ok()).unwrap_or(default);

        Ok(Self {
            bind_addr,
            universe_path:    get("UNIVERSE_PATH").map(PathBuf::from).unwrap_or(defaults.universe_path),
            quote_base_url:   get("QUOTE_BASE_URL").unwrap_or(defaults.quote_base_url),
            quote_timeout,
            scan_pace,
            timezone,
            alerts_enabled:   get("ENABLE_ALERTS").map(|v| v == "1" || v.eq_ignore_ascii_case("true")).unwrap_or(false),
            alert_interval:   Duration::from_secs(env_u64("ALERT_INTERVAL_SECS", 60).max(1)),
            alert_send_delay: Duration::from_millis(env_u64("ALERT_SEND_DELAY_MS", 200)),
            alert_state_path: get("ALERT_STATE_PATH").map(PathBuf::from).unwrap_or(defaults.alert_state_path),
            telegram,
        })
    }
}

//! # market::yahoo
//!
//! [`QuoteProvider`] backed by the Yahoo Finance v7 quote endpoint.
//!
//! ```text
//! GET {base}/v7/finance/quote?symbols=ABCD
//! { "quoteResponse": { "result": [ { "regularMarketPrice": 1.2, ... } ] } }
//! ```

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use super::{Quote, QuoteProvider};
use crate::error::FetchError;

const USER_AGENT: &str = concat!("pennygems/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteEnvelope {
    quote_response: QuoteResponse,
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(default)]
    result: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YahooQuote {
    regular_market_price:          Option<f64>,
    regular_market_previous_close: Option<f64>,
    regular_market_volume:         Option<f64>,
    market_cap:                    Option<f64>,
    #[serde(rename = "averageDailyVolume10Day")]
    average_daily_volume_10_day:   Option<f64>,
}

pub struct YahooQuoteProvider {
    client:   reqwest::Client,
    base_url: String,
}

impl YahooQuoteProvider {
    /// Every request made through this provider is bounded by `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl QuoteProvider for YahooQuoteProvider {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    async fn fetch_quote(&self, ticker: &str) -> Result<Quote, FetchError> {
        let url = format!("{}/v7/finance/quote", self.base_url);

        let resp = self
            .client
            .get(&url)
            .query(&[("symbols", ticker)])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status().as_u16()));
        }

        let body = resp.text().await?;
        parse_quote_response(&body, ticker)
    }
}

/// Decode a v7 quote body into the first (only) [`Quote`] it contains.
fn parse_quote_response(body: &str, ticker: &str) -> Result<Quote, FetchError> {
    let envelope: QuoteEnvelope = serde_json::from_str(body)?;

    let raw = envelope
        .quote_response
        .result
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::NoData(ticker.to_string()))?;

    Ok(Quote {
        last_price:     raw.regular_market_price,
        previous_close: raw.regular_market_previous_close,
        volume:         raw.regular_market_volume,
        market_cap:     raw.market_cap,
        avg_volume_10d: raw.average_daily_volume_10_day,
    })
}

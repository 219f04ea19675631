//! # error
//!
//! Typed failure reasons for every boundary that talks to the outside world.
//!
//! The scanner turns a [`FetchError`] into "skip this ticker", the dispatcher
//! turns a [`NotifyError`] into "retry next cycle" and a [`LedgerError`] into
//! a warning. They exist so logs say *why* something was skipped.
//!
//! Handlers that can fail return [`AppError`], which renders as a structured
//! JSON body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Anything that goes wrong while pulling one quote from the provider.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection refused, DNS failure, timeout...
    #[error("Quote provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider answered with a non-2xx status.
    #[error("Quote provider returned HTTP {0}")]
    Status(u16),

    /// Body was not the JSON shape we expect.
    #[error("Malformed quote payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Provider knows nothing about this symbol.
    #[error("No quote data for {0}")]
    NoData(String),
}

/// Outbound notification failed; the alert key is not recorded.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The request URL carries the bot token; build with
    /// `reqwest::Error::without_url`.
    #[error("Notification API unreachable: {0}")]
    Transport(reqwest::Error),

    #[error("Notification rejected: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Reading or persisting the alert ledger failed. The dispatcher reads a
/// missing or corrupt ledger as empty; only the status view reports it.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Ledger I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ledger JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure of an HTTP handler.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Alert ledger unavailable: {0}")]
    Ledger(#[from] LedgerError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Ledger(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "ok":    false,
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

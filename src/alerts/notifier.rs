//! # alerts::notifier — Outbound notification sink

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::error::NotifyError;

/// Fire-and-forget text sink. `Ok` means the remote accepted the message;
/// delivery beyond that is not tracked.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}

// ─── Telegram ─────────────────────────────────────────────────────────────────

pub struct TelegramNotifier {
    client:  reqwest::Client,
    api_url: String,
    token:   String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(api_url: &str, token: &str, chat_id: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token:   token.to_string(),
            chat_id: chat_id.to_string(),
        })
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let url = format!("{}/bot{}/sendMessage", self.api_url, self.token);

        let resp = self
            .client
            .get(&url)
            .query(&[("chat_id", self.chat_id.as_str()), ("text", text)])
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.without_url()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected { status, body });
        }

        debug!(chat_id = %self.chat_id, "Telegram message accepted");
        Ok(())
    }
}

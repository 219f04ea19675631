//! # alerts::ledger
//!
//! The **Alert Ledger** — the set of `{session}:{ticker}:{YYYYMMDD}` keys
//! already notified. It is the only state that survives a restart.
//!
//! ## File layout
//! ```json
//! { "sent": ["REG:ABCD:20261016", "PRE:WXYZ:20261016"] }
//! ```
//!
//! Reads are forgiving (missing or corrupt file → empty ledger). Writes go
//! to a sibling temp file first and are then renamed over the target, so a
//! crash mid-write leaves the previous ledger intact.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::LedgerError;
use crate::models::Session;

// ─── AlertKey ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlertKey {
    pub session: Session,
    pub ticker:  String,
    pub day:     NaiveDate,
}

impl AlertKey {
    pub fn new(session: Session, ticker: &str, day: NaiveDate) -> Self {
        Self {
            session,
            ticker: ticker.to_string(),
            day,
        }
    }
}

impl fmt::Display for AlertKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.session, self.ticker, self.day.format("%Y%m%d"))
    }
}

// ─── AlertLedger ──────────────────────────────────────────────────────────────

#[derive(Debug, Default, Serialize, Deserialize)]
struct LedgerFile {
    #[serde(default)]
    sent: BTreeSet<String>,
}

#[derive(Debug)]
pub struct AlertLedger {
    path: PathBuf,
    sent: BTreeSet<String>,
}

impl AlertLedger {
    /// Load the ledger at `path`. Never fails.
    pub async fn load(path: &Path) -> Self {
        let sent = match read_keys(path).await {
            Ok(Some(sent)) => sent,
            Ok(None) => {
                debug!(path = %path.display(), "No alert ledger yet — starting empty");
                BTreeSet::new()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Alert ledger unusable — starting empty");
                BTreeSet::new()
            }
        };

        Self { path: path.to_path_buf(), sent }
    }

    /// Number of keys in the file at `path`; a missing file counts as zero.
    ///
    /// Takes no lock: [`persist`](Self::persist) replaces the file by rename,
    /// so this always sees either the previous or the next complete ledger.
    pub async fn count(path: &Path) -> Result<usize, LedgerError> {
        Ok(read_keys(path).await?.map_or(0, |sent| sent.len()))
    }

    pub fn was_notified(&self, key: &AlertKey) -> bool {
        self.sent.contains(&key.to_string())
    }

    pub fn record_batch<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = AlertKey>,
    {
        self.sent.extend(keys.into_iter().map(|k| k.to_string()));
    }

    pub fn len(&self) -> usize {
        self.sent.len()
    }

    /// Overwrite the file with the full in-memory set (write-then-rename).
    pub async fn persist(&self) -> Result<(), LedgerError> {
        let body = serde_json::to_vec(&LedgerFile { sent: self.sent.clone() })?;

        let mut tmp_name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "alert_state.json".into());
        tmp_name.push(".tmp");
        let tmp = self.path.with_file_name(tmp_name);

        tokio::fs::write(&tmp, &body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(path = %self.path.display(), keys = self.sent.len(), "Alert ledger persisted");
        Ok(())
    }
}

/// `Ok(None)` when the file does not exist.
async fn read_keys(path: &Path) -> Result<Option<BTreeSet<String>>, LedgerError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_slice::<LedgerFile>(&bytes)?.sent))
}

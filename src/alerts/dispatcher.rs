//! # alerts::dispatcher
//!
//! **Alert Dispatcher** — sends one notification per new
//! `{session, ticker, day}` and remembers it in the ledger.
//!
//! ## One cycle
//! ```text
//! lock ─▶ load ledger ─▶ for top 20 results:
//!                          key seen?      skip
//!                          send ok?       record key, count, pause
//!                          send failed?   leave key out (retried next cycle)
//!        ─▶ persist full ledger ─▶ unlock
//! ```
//!
//! The whole load → mutate → persist sequence runs under a single async
//! mutex, so overlapping cycles (alert loop tick + manual trigger, two ticks
//! after a slow scan) can't lose each other's keys. Readers of the ledger
//! size stay outside that lock.

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::ledger::{AlertKey, AlertLedger};
use super::notifier::Notifier;
use crate::error::LedgerError;
use crate::models::{Session, Snapshot};

/// At most this many results are considered per cycle.
pub const MAX_ALERTS_PER_CYCLE: usize = 20;

pub struct AlertDispatcher {
    /// `None` = credentials not configured; every dispatch is a no-op.
    notifier:    Option<Arc<dyn Notifier>>,
    ledger_path: PathBuf,
    send_delay:  Duration,
    /// Zone that defines "today" for the dedup key.
    timezone:    Tz,
    cycle_lock:  Mutex<()>,
}

impl AlertDispatcher {
    pub fn new(
        notifier:    Option<Arc<dyn Notifier>>,
        ledger_path: PathBuf,
        send_delay:  Duration,
        timezone:    Tz,
    ) -> Self {
        Self {
            notifier,
            ledger_path,
            send_delay,
            timezone,
            cycle_lock: Mutex::new(()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.notifier.is_some()
    }

    /// Number of keys currently persisted. Does not wait for a running cycle.
    pub async fn ledger_size(&self) -> Result<usize, LedgerError> {
        AlertLedger::count(&self.ledger_path).await
    }

    /// Dispatch using today's date in the market time zone.
    pub async fn dispatch(&self, results: &[Snapshot], session: Session) -> usize {
        let today = Utc::now().with_timezone(&self.timezone).date_naive();
        self.dispatch_on(results, session, today).await
    }

    /// Returns the number of alerts newly sent.
    pub async fn dispatch_on(&self, results: &[Snapshot], session: Session, today: NaiveDate) -> usize {
        let Some(notifier) = self.notifier.as_ref() else {
            debug!("Notifier not configured — dispatch skipped");
            return 0;
        };
        if results.is_empty() {
            return 0;
        }

        let _guard = self.cycle_lock.lock().await;
        let mut ledger = AlertLedger::load(&self.ledger_path).await;
        let mut sent = 0usize;

        for snap in results.iter().take(MAX_ALERTS_PER_CYCLE) {
            let key = AlertKey::new(session, &snap.ticker, today);
            if ledger.was_notified(&key) {
                continue;
            }

            match notifier.send(&format_alert(snap, session)).await {
                Ok(()) => {
                    info!(%key, signal = ?snap.signal, "📣 Alert sent");
                    ledger.record_batch([key]);
                    sent += 1;
                    if !self.send_delay.is_zero() {
                        tokio::time::sleep(self.send_delay).await;
                    }
                }
                Err(e) => {
                    warn!(%key, error = %e, "Alert send failed — will retry next cycle");
                }
            }
        }

        if let Err(e) = ledger.persist().await {
            warn!(path = %self.ledger_path.display(), error = %e, "Failed to persist alert ledger");
        }

        info!(%session, candidates = results.len().min(MAX_ALERTS_PER_CYCLE), sent, "Dispatch cycle complete");
        sent
    }
}

// ─── Message Formatting ───────────────────────────────────────────────────────

/// Telegram message body for one admitted snapshot.
pub fn format_alert(snap: &Snapshot, session: Session) -> String {
    let signal = snap.signal.map(|s| s.to_string()).unwrap_or_else(|| "-".into());
    let price  = snap.price.map(|p| format!("{p:.4}")).unwrap_or_else(|| "-".into());
    let pct    = snap.percent_change.map(|p| format!("{p:.2}")).unwrap_or_else(|| "-".into());
    let volume = snap.volume.map(group_thousands).unwrap_or_else(|| "-".into());
    let cap_m  = (snap.market_cap.unwrap_or(0.0) / 1e6) as u64;
    let rel    = snap.relative_volume.map(|r| format!("{r:.2}")).unwrap_or_else(|| "-".into());
    let score  = snap.breakout_score.map(|s| s.to_string()).unwrap_or_else(|| "-".into());

    format!(
        "🔥 PennyGems {session} {signal}\n\
         {ticker} ${price} ({pct}%)\n\
         Vol {volume} | MktCap {cap_m}M | RelVol {rel}\n\
         Score {score}\n\
         https://finance.yahoo.com/quote/{ticker}",
        ticker = snap.ticker,
    )
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotifyError;
    use crate::models::Signal;
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;
    use tokio::sync::Notify;

    #[derive(Default)]
    struct RecordingNotifier {
        messages: StdMutex<Vec<String>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, text: &str) -> Result<(), NotifyError> {
            self.messages.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    /// Fails for any message that mentions `bad_ticker`.
    struct FlakyNotifier {
        bad_ticker: &'static str,
        delivered:  StdMutex<usize>,
    }

    #[async_trait]
    impl Notifier for FlakyNotifier {
        async fn send(&self, text: &str) -> Result<(), NotifyError> {
            if text.contains(self.bad_ticker) {
                return Err(NotifyError::Rejected { status: 502, body: "bad gateway".into() });
            }
            *self.delivered.lock().unwrap() += 1;
            Ok(())
        }
    }

    /// Parks inside `send` until released.
    #[derive(Default)]
    struct GatedNotifier {
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl Notifier for GatedNotifier {
        async fn send(&self, _text: &str) -> Result<(), NotifyError> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(())
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn buy(ticker: &str) -> Snapshot {
        Snapshot {
            ticker:          ticker.into(),
            price:           Some(1.0),
            previous_close:  Some(0.7142857),
            percent_change:  Some(40.0),
            volume:          Some(1_234_567),
            market_cap:      Some(50_000_000.0),
            relative_volume: Some(2.8),
            signal:          Some(Signal::Buy),
            breakout_score:  Some(78),
            session:         Session::Reg,
        }
    }

    fn dispatcher(notifier: Option<Arc<dyn Notifier>>, path: PathBuf) -> AlertDispatcher {
        AlertDispatcher::new(notifier, path, Duration::ZERO, chrono_tz::America::New_York)
    }

    #[tokio::test]
    async fn test_second_dispatch_same_day_sends_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = Arc::new(RecordingNotifier::default());
        let d = dispatcher(Some(notifier.clone()), dir.path().join("ledger.json"));
        let results = vec![buy("ABCD")];

        assert_eq!(d.dispatch_on(&results, Session::Reg, today()).await, 1);
        assert_eq!(d.ledger_size().await.unwrap(), 1);
        assert_eq!(d.dispatch_on(&results, Session::Reg, today()).await, 0);
        assert_eq!(notifier.messages.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_dedup_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let results = vec![buy("ABCD")];

        let first = dispatcher(Some(Arc::new(RecordingNotifier::default())), path.clone());
        assert_eq!(first.dispatch_on(&results, Session::Reg, today()).await, 1);
        drop(first);

        let second = dispatcher(Some(Arc::new(RecordingNotifier::default())), path);
        assert_eq!(second.dispatch_on(&results, Session::Reg, today()).await, 0);
    }

    #[tokio::test]
    async fn test_new_day_or_session_alerts_again() {
        let dir = tempfile::tempdir().unwrap();
        let d = dispatcher(Some(Arc::new(RecordingNotifier::default())), dir.path().join("ledger.json"));
        let results = vec![buy("ABCD")];

        assert_eq!(d.dispatch_on(&results, Session::Reg, today()).await, 1);
        assert_eq!(d.dispatch_on(&results, Session::Post, today()).await, 1);
        assert_eq!(d.dispatch_on(&results, Session::Reg, today().succ_opt().unwrap()).await, 1);
        assert_eq!(d.ledger_size().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_unconfigured_or_empty_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");

        let d = dispatcher(None, path.clone());
        assert!(!d.is_configured());
        assert_eq!(d.dispatch_on(&[buy("ABCD")], Session::Reg, today()).await, 0);

        let d = dispatcher(Some(Arc::new(RecordingNotifier::default())), path.clone());
        assert_eq!(d.dispatch_on(&[], Session::Reg, today()).await, 0);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_failed_send_is_not_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let flaky = Arc::new(FlakyNotifier { bad_ticker: "FAIL", delivered: StdMutex::new(0) });
        let d = dispatcher(Some(flaky.clone()), path.clone());

        let results = vec![buy("GOOD"), buy("FAIL")];
        assert_eq!(d.dispatch_on(&results, Session::Reg, today()).await, 1);

        let ledger = AlertLedger::load(&path).await;
        assert!(ledger.was_notified(&AlertKey::new(Session::Reg, "GOOD", today())));
        assert!(!ledger.was_notified(&AlertKey::new(Session::Reg, "FAIL", today())));

        // FAIL is attempted again on the next cycle; GOOD is not.
        let retry = dispatcher(Some(Arc::new(RecordingNotifier::default())), path);
        assert_eq!(retry.dispatch_on(&results, Session::Reg, today()).await, 1);
    }

    #[tokio::test]
    async fn test_only_top_twenty_considered() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = Arc::new(RecordingNotifier::default());
        let d = dispatcher(Some(notifier.clone()), dir.path().join("ledger.json"));

        let results: Vec<_> = (0..25).map(|i| buy(&format!("T{i:02}"))).collect();
        assert_eq!(d.dispatch_on(&results, Session::Reg, today()).await, MAX_ALERTS_PER_CYCLE);

        let messages = notifier.messages.lock().unwrap();
        assert!(messages.iter().any(|m| m.contains("T19")));
        assert!(!messages.iter().any(|m| m.contains("T20")));
    }

    #[tokio::test]
    async fn test_concurrent_cycles_do_not_double_send() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = Arc::new(RecordingNotifier::default());
        let d = Arc::new(dispatcher(Some(notifier.clone()), dir.path().join("ledger.json")));
        let results = vec![buy("ABCD"), buy("WXYZ")];

        let (a, b) = tokio::join!(
            d.dispatch_on(&results, Session::Reg, today()),
            d.dispatch_on(&results, Session::Reg, today()),
        );

        assert_eq!(a + b, 2);
        assert_eq!(notifier.messages.lock().unwrap().len(), 2);
        assert_eq!(d.ledger_size().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_ledger_size_readable_during_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let gate = Arc::new(GatedNotifier::default());
        let d = Arc::new(dispatcher(Some(gate.clone()), dir.path().join("ledger.json")));

        let cycle = tokio::spawn({
            let d = d.clone();
            async move { d.dispatch_on(&[buy("ABCD")], Session::Reg, today()).await }
        });
        gate.entered.notified().await;

        let size = tokio::time::timeout(Duration::from_secs(1), d.ledger_size())
            .await
            .expect("ledger_size blocked behind the running cycle")
            .unwrap();
        assert_eq!(size, 0);

        gate.release.notify_one();
        assert_eq!(cycle.await.unwrap(), 1);
        assert_eq!(d.ledger_size().await.unwrap(), 1);
    }

    #[test]
    fn test_message_layout() {
        let text = format_alert(&buy("ABCD"), Session::Reg);
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "🔥 PennyGems REG BUY");
        assert_eq!(lines[1], "ABCD $1.0000 (40.00%)");
        assert_eq!(lines[2], "Vol 1,234,567 | MktCap 50M | RelVol 2.80");
        assert_eq!(lines[3], "Score 78");
        assert_eq!(lines[4], "https://finance.yahoo.com/quote/ABCD");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(800_000), "800,000");
        assert_eq!(group_thousands(12_345_678), "12,345,678");
    }
}

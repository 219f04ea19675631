//! # engine::scanner
//!
//! **Scan Orchestrator** — one pass over the ticker universe.
//!
//! ```text
//! resolve session (once)
//!     │
//!     └─ for each ticker, in universe order:
//!          fetch ──▶ None?            skip
//!          filter ─▶ rejected?        skip
//!          classify + score ─▶ IGNORE? skip
//!          keep
//!          sleep(pace)
//!
//! stable sort kept snapshots by % change, descending
//! ```
//!
//! A scan holds no shared mutable state, so the dashboard and the alert loop
//! can run scans concurrently. Dropping the future mid-scan has no side
//! effects.

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono_tz::Tz;
use tracing::{debug, info};
use uuid::Uuid;

use crate::engine::{classifier::classify, filter::admits, scoring::breakout_score, session};
use crate::market::{fetch_snapshot, QuoteProvider};
use crate::models::{Session, SessionChoice, Signal, Snapshot, Thresholds};

pub struct Scanner {
    provider: Arc<dyn QuoteProvider>,
    /// Delay between successive provider calls.
    pace:     Duration,
    /// Zone used to resolve `AUTO` sessions.
    timezone: Tz,
}

impl Scanner {
    pub fn new(provider: Arc<dyn QuoteProvider>, pace: Duration, timezone: Tz) -> Self {
        Self { provider, pace, timezone }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Resolve `choice` and scan `universe` under the resulting session.
    pub async fn scan(
        &self,
        universe: &[String],
        choice:   SessionChoice,
        limits:   &Thresholds,
    ) -> Vec<Snapshot> {
        let session = session::resolve(choice, self.timezone);
        self.scan_session(universe, session, limits).await
    }

    /// Scan with an already-resolved session.
    pub async fn scan_session(
        &self,
        universe: &[String],
        session:  Session,
        limits:   &Thresholds,
    ) -> Vec<Snapshot> {
        let scan_id = Uuid::new_v4();
        let started = Instant::now();
        let mut kept = Vec::new();
        let mut fetched = 0usize;

        debug!(%scan_id, %session, tickers = universe.len(), "Scan starting");

        for (i, ticker) in universe.iter().enumerate() {
            if i > 0 && !self.pace.is_zero() {
                tokio::time::sleep(self.pace).await;
            }

            let Some(snap) = fetch_snapshot(self.provider.as_ref(), ticker, session).await else {
                continue;
            };
            fetched += 1;

            if !admits(&snap, session, limits) {
                continue;
            }

            let signal = classify(&snap, limits);
            if signal == Signal::Ignore {
                debug!(ticker = %snap.ticker, "Admitted but classified IGNORE");
                continue;
            }

            let score = breakout_score(&snap);
            kept.push(snap.classified(signal, score));
        }

        sort_by_momentum(&mut kept);

        info!(
            %scan_id,
            %session,
            tickers  = universe.len(),
            fetched,
            admitted = kept.len(),
            elapsed  = ?started.elapsed(),
            "🔎 Scan complete"
        );

        kept
    }
}

/// Stable sort, largest % change first. Absent % change sorts last.
pub fn sort_by_momentum(snaps: &mut [Snapshot]) {
    snaps.sort_by(|a, b| {
        let a = a.percent_change.unwrap_or(f64::MIN);
        let b = b.percent_change.unwrap_or(f64::MIN);
        b.partial_cmp(&a).unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::testing::{quote, StubProvider};
    use std::sync::atomic::Ordering as AtomicOrdering;

    fn universe(tickers: &[&str]) -> Vec<String> {
        tickers.iter().map(|t| t.to_string()).collect()
    }

    fn scanner(provider: Arc<StubProvider>) -> Scanner {
        Scanner::new(provider, Duration::ZERO, chrono_tz::America::New_York)
    }

    #[tokio::test]
    async fn test_example_scenarios() {
        let provider = Arc::new(StubProvider::with(&[
            // 49 → IGNORE, dropped
            ("LOWS", quote(1.20, 18.0, 800_000.0, Some(50_000_000.0), 2.1)),
            // 70 → WATCH
            ("WTCH", quote(1.20, 35.0, 800_000.0, Some(50_000_000.0), 2.5)),
            // 78 → BUY
            ("BUYY", quote(1.00, 40.0, 800_000.0, Some(50_000_000.0), 2.8)),
            // cap too large → filtered
            ("BIGC", quote(1.00, 40.0, 800_000.0, Some(350_000_000.0), 2.8)),
        ]));

        let results = scanner(provider)
            .scan(&universe(&["LOWS", "WTCH", "BUYY", "BIGC"]), Session::Reg.into(), &Thresholds::default())
            .await;

        let rows: Vec<_> = results
            .iter()
            .map(|s| (s.ticker.as_str(), s.signal, s.breakout_score))
            .collect();

        assert_eq!(
            rows,
            vec![
                ("BUYY", Some(Signal::Buy), Some(78)),
                ("WTCH", Some(Signal::Watch), Some(70)),
            ]
        );
        assert!(results.iter().all(|s| s.session == Session::Reg));
    }

    #[tokio::test]
    async fn test_failed_fetches_are_skipped_silently() {
        let provider = Arc::new(StubProvider::with(&[
            ("GOOD", quote(1.00, 40.0, 800_000.0, None, 2.8)),
        ]));

        let results = scanner(provider.clone())
            .scan(&universe(&["MISS", "GOOD", "GONE"]), Session::Reg.into(), &Thresholds::default())
            .await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].ticker, "GOOD");
        assert_eq!(provider.calls.load(AtomicOrdering::Relaxed), 3);
    }

    #[tokio::test]
    async fn test_output_sorted_by_percent_change_desc() {
        let provider = Arc::new(StubProvider::with(&[
            ("AAAA", quote(1.00, 30.0, 900_000.0, None, 3.0)),
            ("BBBB", quote(1.00, 48.0, 900_000.0, None, 3.0)),
            ("CCCC", quote(1.00, 39.0, 900_000.0, None, 3.0)),
        ]));

        let results = scanner(provider)
            .scan(&universe(&["AAAA", "BBBB", "CCCC"]), Session::Reg.into(), &Thresholds::default())
            .await;

        let tickers: Vec<_> = results.iter().map(|s| s.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["BBBB", "CCCC", "AAAA"]);
        assert!(results.iter().all(|s| s.percent_change.is_some()));
    }

    #[tokio::test]
    async fn test_overrides_change_admission() {
        let provider = Arc::new(StubProvider::with(&[
            ("PRCY", quote(4.00, 45.0, 900_000.0, None, 3.0)),
        ]));
        let scanner = scanner(provider);
        let tickers = universe(&["PRCY"]);

        let default_run = scanner.scan(&tickers, Session::Reg.into(), &Thresholds::default()).await;
        assert!(default_run.is_empty());

        let wide = Thresholds { price_max: 5.0, ..Thresholds::default() };
        let wide_run = scanner.scan(&tickers, Session::Reg.into(), &wide).await;
        // 45 + 30, no price bonus → 75 with rel_vol 3.0 → BUY
        assert_eq!(wide_run.len(), 1);
        assert_eq!(wide_run[0].signal, Some(Signal::Buy));
    }

    #[test]
    fn test_sort_is_stable_and_puts_absent_last() {
        let mk = |t: &str, pct: Option<f64>| Snapshot {
            ticker:          t.into(),
            price:           Some(1.0),
            previous_close:  None,
            percent_change:  pct,
            volume:          None,
            market_cap:      None,
            relative_volume: None,
            signal:          None,
            breakout_score:  None,
            session:         Session::Pre,
        };

        let mut snaps = vec![mk("NONE", None), mk("TIE1", Some(10.0)), mk("TOP", Some(20.0)), mk("TIE2", Some(10.0))];
        sort_by_momentum(&mut snaps);

        let order: Vec<_> = snaps.iter().map(|s| s.ticker.as_str()).collect();
        assert_eq!(order, vec!["TOP", "TIE1", "TIE2", "NONE"]);
    }
}

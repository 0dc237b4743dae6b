//! Background refresh loop.
//!
//! Runs a fixed-period cycle for the lifetime of the process:
//!
//! ```text
//! tick ─► QuoteFetcher::fetch(all tickers) ──Err──► keep values, wait
//!                    │
//!                    Ok(raw)
//!                    ▼
//!         for each record: extract(raw, ticker) ──Err──► keep that record
//!                    │
//!                    Ok(fields)
//!                    ▼
//!              record.replace(fields)
//! ```
//!
//! This loop is the only writer of record fields.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use log::{debug, error, info, warn};
use tokio::time::{interval, timeout, MissedTickBehavior};

use tuimarket_market_data::{extract, ExtractError, FetchError, QuoteFetcher};

use crate::errors::{Error, Result};
use crate::watchlist::Watchlist;

/// Result of one successful refresh cycle.
#[derive(Debug, Default)]
pub struct RefreshReport {
    /// Records whose fields were replaced.
    pub updated: usize,
    /// Symbols whose extraction failed; their records were left unchanged.
    pub failures: Vec<ExtractError>,
}

/// Drives the fetcher on a fixed period and writes results to the watchlist.
pub struct RefreshScheduler {
    fetcher: Arc<dyn QuoteFetcher>,
    watchlist: Arc<Watchlist>,
    period: Duration,
}

impl RefreshScheduler {
    pub fn new(fetcher: Arc<dyn QuoteFetcher>, watchlist: Arc<Watchlist>, period: Duration) -> Self {
        Self {
            fetcher,
            watchlist,
            period,
        }
    }

    /// Run one fetch-and-update cycle.
    ///
    /// A fetch that does not finish within one period fails with
    /// [`FetchError::Timeout`]. On any fetch failure no record is touched.
    pub async fn refresh_once(&self) -> Result<RefreshReport> {
        let tickers = self.watchlist.tickers();

        let raw = match timeout(self.period, self.fetcher.fetch(&tickers)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(FetchError::Timeout {
                    provider: self.fetcher.id().to_string(),
                }
                .into())
            }
        };

        let mut report = RefreshReport::default();
        for record in self.watchlist.records() {
            match extract(&raw, record.ticker()) {
                Ok(fields) => {
                    record.replace(fields);
                    report.updated += 1;
                }
                Err(e) => {
                    debug!("Keeping previous values for {}: {}", e.ticker(), e);
                    report.failures.push(e);
                }
            }
        }

        Ok(report)
    }

    /// Run one cycle and record its outcome in the watchlist status.
    pub async fn run_cycle(&self) {
        match self.refresh_once().await {
            Ok(report) => {
                if report.failures.is_empty() {
                    debug!("Refreshed {} symbols", report.updated);
                } else {
                    warn!(
                        "Refreshed {} symbols, {} failed",
                        report.updated,
                        report.failures.len()
                    );
                }
                self.watchlist
                    .mark_refreshed(Local::now(), report.failures.len());
            }
            Err(e) => {
                if e.is_transient() {
                    warn!("Quote refresh skipped: {}", e);
                } else {
                    error!("Quote refresh skipped: {}", e);
                }
                let message = match &e {
                    Error::Fetch(inner) => inner.to_string(),
                    other => other.to_string(),
                };
                self.watchlist.mark_failed(message);
            }
        }
    }

    /// Refresh forever. The first cycle starts immediately.
    pub async fn run(self) {
        info!(
            "Refresh scheduler started ({} symbols, {}s interval)",
            self.watchlist.len(),
            self.period.as_secs_f64()
        );

        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.run_cycle().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StaticFetcher(Mutex<Option<std::result::Result<Vec<u8>, FetchError>>>);

    #[async_trait]
    impl QuoteFetcher for StaticFetcher {
        fn id(&self) -> &'static str {
            "STATIC"
        }

        async fn fetch(&self, _symbols: &[String]) -> std::result::Result<Vec<u8>, FetchError> {
            self.0.lock().unwrap().take().unwrap_or_else(|| {
                Err(FetchError::EmptyResponse {
                    provider: "STATIC".to_string(),
                })
            })
        }
    }

    struct SlowFetcher;

    #[async_trait]
    impl QuoteFetcher for SlowFetcher {
        fn id(&self) -> &'static str {
            "SLOW"
        }

        async fn fetch(&self, _symbols: &[String]) -> std::result::Result<Vec<u8>, FetchError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_slow_fetch_times_out_after_one_period() {
        let watchlist = Arc::new(Watchlist::new(["AAA"]).unwrap());
        let scheduler = RefreshScheduler::new(
            Arc::new(SlowFetcher),
            Arc::clone(&watchlist),
            Duration::from_millis(20),
        );

        let err = scheduler.refresh_once().await.unwrap_err();
        assert!(matches!(
            err,
            Error::Fetch(FetchError::Timeout { ref provider }) if provider == "SLOW"
        ));
    }

    #[tokio::test]
    async fn test_run_cycle_records_failure_status() {
        let watchlist = Arc::new(Watchlist::new(["AAA"]).unwrap());
        let fetcher = StaticFetcher(Mutex::new(Some(Err(FetchError::HttpStatus {
            provider: "STATIC".to_string(),
            status: 503,
        }))));
        let scheduler =
            RefreshScheduler::new(Arc::new(fetcher), Arc::clone(&watchlist), Duration::from_secs(1));

        scheduler.run_cycle().await;

        let status = watchlist.status();
        assert_eq!(
            status.last_error.as_deref(),
            Some("HTTP 503 from STATIC")
        );
        assert!(status.last_success.is_none());
    }

    #[tokio::test]
    async fn test_run_cycle_records_partial_failures() {
        let watchlist = Arc::new(Watchlist::new(["AAA", "BBB"]).unwrap());
        let raw = br#"[{"regularMarketPrice":2,"regularMarketPreviousClose":1,"marketState":"REGULAR","shortName":"A","symbol":"AAA"}]"#;
        let fetcher = StaticFetcher(Mutex::new(Some(Ok(raw.to_vec()))));
        let scheduler =
            RefreshScheduler::new(Arc::new(fetcher), Arc::clone(&watchlist), Duration::from_secs(1));

        scheduler.run_cycle().await;

        let status = watchlist.status();
        assert!(status.last_success.is_some());
        assert_eq!(status.failed_symbols, 1);
        assert_eq!(watchlist.find("AAA").unwrap().snapshot().price, 2.0);
    }
}

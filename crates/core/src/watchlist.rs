//! Shared watchlist model.
//!
//! The watchlist is built once at startup and never changes shape: the record
//! count and order are fixed, so only each record's field group needs
//! synchronization. The refresh loop replaces a record's [`QuoteFields`] as a
//! whole under a write lock and the renderer clones them under a read lock, so
//! a frame sees either the old or the new group, never a mix of both.

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Local};

use tuimarket_market_data::QuoteFields;

use crate::errors::{ConfigError, Result};

/// One tracked ticker and its latest quote fields.
#[derive(Debug)]
pub struct SymbolRecord {
    ticker: String,
    fields: RwLock<QuoteFields>,
}

impl SymbolRecord {
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            fields: RwLock::new(QuoteFields::default()),
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Consistent copy of the four quote fields.
    pub fn snapshot(&self) -> QuoteFields {
        read(&self.fields).clone()
    }

    /// Replace all four quote fields at once.
    ///
    /// Only the refresh loop writes records.
    pub fn replace(&self, fields: QuoteFields) {
        *write(&self.fields) = fields;
    }
}

/// Outcome of the most recent refresh cycles, shown in the status line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RefreshStatus {
    /// When the last batch fetch succeeded
    pub last_success: Option<DateTime<Local>>,
    /// Message of the last fetch failure, cleared by the next success
    pub last_error: Option<String>,
    /// Symbols whose extraction failed in the last successful cycle
    pub failed_symbols: usize,
}

/// Ordered, fixed-membership list of [`SymbolRecord`]s.
#[derive(Debug)]
pub struct Watchlist {
    records: Vec<SymbolRecord>,
    status: RwLock<RefreshStatus>,
}

impl Watchlist {
    /// Build a watchlist from tickers in display order.
    ///
    /// Duplicates are dropped, keeping the first occurrence. Fails if no
    /// ticker remains.
    pub fn new<I, S>(tickers: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut records = Vec::new();
        for ticker in tickers {
            let ticker: String = ticker.into();
            if seen.insert(ticker.clone()) {
                records.push(SymbolRecord::new(ticker));
            }
        }

        if records.is_empty() {
            return Err(ConfigError::EmptyWatchlist.into());
        }

        Ok(Self {
            records,
            status: RwLock::new(RefreshStatus::default()),
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[SymbolRecord] {
        &self.records
    }

    pub fn find(&self, ticker: &str) -> Option<&SymbolRecord> {
        self.records.iter().find(|r| r.ticker == ticker)
    }

    /// All tickers in display order.
    pub fn tickers(&self) -> Vec<String> {
        self.records.iter().map(|r| r.ticker.clone()).collect()
    }

    pub fn status(&self) -> RefreshStatus {
        read(&self.status).clone()
    }

    /// Record a cycle whose batch fetch succeeded.
    pub fn mark_refreshed(&self, at: DateTime<Local>, failed_symbols: usize) {
        let mut status = write(&self.status);
        status.last_success = Some(at);
        status.last_error = None;
        status.failed_symbols = failed_symbols;
    }

    /// Record a cycle whose batch fetch failed. Quote values are untouched.
    pub fn mark_failed(&self, message: impl Into<String>) {
        write(&self.status).last_error = Some(message.into());
    }
}

// A panic while holding one of these locks cannot leave the data half-written
// (every write is a single assignment), so poisoned locks are recovered.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

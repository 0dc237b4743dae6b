//! tuimarket Market Data Crate
//!
//! This crate turns a list of ticker symbols into per-symbol quote fields.
//!
//! # Overview
//!
//! ```text
//! +------------------+     +------------------+
//! |  QuoteFetcher    | --> |    Transport     |  (one batched GET)
//! +------------------+     +------------------+
//!          |
//!          v  raw bytes
//! +------------------+
//! |     extract      |  (per-ticker, record-scoped scrape)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |   QuoteFields    |  (name, market state, price, previous close)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`QuoteFetcher`] - Batched payload retrieval for a set of symbols
//! - [`Transport`] - Raw `get(url) -> bytes` capability
//! - [`YahooQuoteFetcher`] - Yahoo Finance v7 implementation
//! - [`QuoteFields`] - The four scraped fields of one symbol
//! - [`FetchError`] / [`ExtractError`] - Batch-level and symbol-level failures

pub mod errors;
pub mod extract;
pub mod models;
pub mod provider;

pub use errors::{ExtractError, FetchError, QuoteField};
pub use extract::extract;
pub use models::QuoteFields;
pub use provider::yahoo::{YahooQuoteFetcher, YahooTransport};
pub use provider::{QuoteFetcher, Transport};

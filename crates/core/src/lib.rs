//! tuimarket Core - Watchlist model, refresh loop and view state.
//!
//! The refresh loop and the renderer share a single [`Watchlist`] through an
//! `Arc`. Its membership is fixed at startup; each record guards its own
//! field group, which the [`RefreshScheduler`] replaces and the renderer
//! snapshots.

pub mod constants;
pub mod errors;
pub mod refresh;
pub mod symbols_file;
pub mod view;
pub mod watchlist;

pub use refresh::{RefreshReport, RefreshScheduler};
pub use symbols_file::SymbolsFile;
pub use view::{visible_rows, ViewState};
pub use watchlist::{RefreshStatus, SymbolRecord, Watchlist};

// Re-export error types
pub use errors::{ConfigError, Error, Result};

// Re-export the quote model so consumers need only this crate
pub use tuimarket_market_data::QuoteFields;

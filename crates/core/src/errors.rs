//! Core error types for tuimarket.

use std::path::PathBuf;
use thiserror::Error;

use tuimarket_market_data::FetchError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the core crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load watchlist: {0}")]
    Config(#[from] ConfigError),

    #[error("Quote fetch failed: {0}")]
    Fetch(#[from] FetchError),
}

impl Error {
    /// Whether the next cycle is likely to succeed without intervention.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Fetch(e) => e.is_transient(),
            Self::Config(_) => false,
        }
    }
}

/// Errors raised while locating or reading the watchlist file.
///
/// All of these are fatal at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine the home directory")]
    NoHomeDirectory,

    #[error("No symbols file found (searched: {})", display_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No symbols listed in {}", .0.display())]
    NoSymbols(PathBuf),

    #[error("Watchlist must contain at least one symbol")]
    EmptyWatchlist,
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

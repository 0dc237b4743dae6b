//! Watchlist file discovery and parsing.
//!
//! The file lists one ticker per line. It is looked up under the home
//! directory in [`SYMBOL_FILE_CANDIDATES`] order and the first readable
//! candidate wins, even if it turns out to be empty.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::constants::SYMBOL_FILE_CANDIDATES;
use crate::errors::{ConfigError, Result};

/// A loaded watchlist file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolsFile {
    pub path: PathBuf,
    pub tickers: Vec<String>,
}

/// Candidate file paths under `home`, in search order.
pub fn candidate_paths(home: &Path) -> Vec<PathBuf> {
    SYMBOL_FILE_CANDIDATES
        .iter()
        .map(|relative| home.join(relative))
        .collect()
}

/// Parse file contents into distinct tickers, in file order.
///
/// Lines are trimmed and upper-cased (quote payloads report symbols in upper
/// case). Blank lines and `#` comments are skipped.
pub fn parse_symbols(text: &str) -> Vec<String> {
    let mut tickers: Vec<String> = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let ticker = line.to_uppercase();
        if !tickers.contains(&ticker) {
            tickers.push(ticker);
        }
    }
    tickers
}

/// Read and parse a specific watchlist file.
pub fn load_file(path: &Path) -> Result<SymbolsFile> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_text(path, &text)
}

fn from_text(path: &Path, text: &str) -> Result<SymbolsFile> {
    let tickers = parse_symbols(text);
    if tickers.is_empty() {
        return Err(ConfigError::NoSymbols(path.to_path_buf()).into());
    }

    info!("Loaded {} symbols from {}", tickers.len(), path.display());
    Ok(SymbolsFile {
        path: path.to_path_buf(),
        tickers,
    })
}

/// Search the candidate locations under `home`.
pub fn discover(home: &Path) -> Result<SymbolsFile> {
    let candidates = candidate_paths(home);
    for path in &candidates {
        match fs::read_to_string(path) {
            Ok(text) => return from_text(path, &text),
            Err(e) => debug!("Skipping {}: {}", path.display(), e),
        }
    }
    Err(ConfigError::NotFound {
        searched: candidates,
    }
    .into())
}

/// Load the watchlist from `explicit` if given, otherwise from the home
/// directory search path.
pub fn load(explicit: Option<&Path>) -> Result<SymbolsFile> {
    match explicit {
        Some(path) => load_file(path),
        None => {
            let home = dirs::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
            discover(&home)
        }
    }
}

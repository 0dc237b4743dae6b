//! Yahoo Finance batch quote fetcher.
//!
//! One request per refresh cycle covers the whole watchlist: the symbols are
//! comma-joined into the v7 `quote` endpoint together with the fixed list of
//! fields the extractor scrapes.

mod session;

pub use session::YahooTransport;

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use urlencoding::encode;

use crate::errors::FetchError;
use crate::provider::{QuoteFetcher, Transport};

const PROVIDER: &str = "YAHOO";

const QUOTE_ENDPOINT: &str = "https://query1.finance.yahoo.com/v7/finance/quote?lang=en-US&region=US&corsDomain=finance.yahoo.com";

/// Fields requested from the quote endpoint, matching what `extract` reads.
pub const QUOTE_FIELDS: &str = "regularMarketPrice,regularMarketPreviousClose,marketState,shortName";

// ============================================================================
// Yahoo Provider
// ============================================================================

/// Yahoo Finance quote fetcher over an injected [`Transport`].
pub struct YahooQuoteFetcher<T: Transport = YahooTransport> {
    transport: T,
}

impl YahooQuoteFetcher<YahooTransport> {
    /// Create a fetcher backed by an authenticated Yahoo HTTP session.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self::with_transport(YahooTransport::new(timeout)?))
    }
}

impl<T: Transport> YahooQuoteFetcher<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Build the batched request URL for `symbols`.
    pub fn quote_url(symbols: &[String]) -> String {
        let joined = symbols.join(",");
        format!(
            "{}&fields={}&symbols={}",
            QUOTE_ENDPOINT,
            encode(QUOTE_FIELDS),
            encode(&joined)
        )
    }
}

#[async_trait]
impl<T: Transport> QuoteFetcher for YahooQuoteFetcher<T> {
    fn id(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch(&self, symbols: &[String]) -> Result<Vec<u8>, FetchError> {
        if symbols.is_empty() {
            return Err(FetchError::ProviderError {
                provider: PROVIDER.to_string(),
                message: "No symbols requested".to_string(),
            });
        }

        let url = Self::quote_url(symbols);
        debug!("Fetching {} quotes from Yahoo", symbols.len());

        let body = self.transport.get(&url).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(FetchError::EmptyResponse {
                provider: PROVIDER.to_string(),
            });
        }

        Ok(body)
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Provider trait definitions.
//!
//! Two seams keep the fetch path testable without a network:
//! - [`Transport`]: the raw `get(url) -> bytes` capability
//! - [`QuoteFetcher`]: one batched request for a whole watchlist

use async_trait::async_trait;

use crate::errors::FetchError;

/// Raw HTTP GET capability used by quote fetchers.
///
/// Implementations return the response body on a success status and map
/// everything else (timeouts, connection failures, non-2xx statuses) to a
/// [`FetchError`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Fetches the raw quote payload for a batch of symbols.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use tuimarket_market_data::{FetchError, QuoteFetcher};
///
/// struct CannedFetcher(Vec<u8>);
///
/// #[async_trait]
/// impl QuoteFetcher for CannedFetcher {
///     fn id(&self) -> &'static str {
///         "CANNED"
///     }
///
///     async fn fetch(&self, _symbols: &[String]) -> Result<Vec<u8>, FetchError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
#[async_trait]
pub trait QuoteFetcher: Send + Sync {
    /// Unique identifier for this provider, used in logs and errors.
    fn id(&self) -> &'static str;

    /// Fetch the raw payload for all `symbols` in a single round trip.
    ///
    /// All-or-nothing: either the whole body is returned or the batch fails.
    /// An empty body is a failure.
    async fn fetch(&self, symbols: &[String]) -> Result<Vec<u8>, FetchError>;
}

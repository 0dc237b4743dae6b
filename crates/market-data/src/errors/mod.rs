//! Error types for the market data crate.
//!
//! Two error families map onto the two failure scopes of a refresh cycle:
//! - [`FetchError`]: the whole batch request failed, nothing can be updated
//! - [`ExtractError`]: one symbol's data is missing or malformed, the rest of
//!   the batch is still usable

use thiserror::Error;

/// Errors raised while retrieving the raw batch payload.
///
/// A fetch is all-or-nothing: any of these means no symbol in the batch
/// received new data this cycle.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request did not complete in time.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider answered with a non-success HTTP status.
    #[error("HTTP {status} from {provider}")]
    HttpStatus {
        /// The provider that returned the status
        provider: String,
        /// The HTTP status code
        status: u16,
    },

    /// The provider answered successfully but sent no body.
    #[error("Empty response from {provider}")]
    EmptyResponse {
        /// The provider that returned the empty body
        provider: String,
    },

    /// A provider-specific failure that is not a plain transport error.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// Description of the failure
        message: String,
    },

    /// A network error occurred (DNS, connection refused, TLS, ...).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl FetchError {
    /// Whether the failure is likely to clear up by itself on the next cycle.
    ///
    /// Only the log level depends on this; every fetch error skips the cycle
    /// and waits for the next period.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::EmptyResponse { .. } => true,
            Self::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::ProviderError { .. } => false,
        }
    }
}

/// Which of the four scraped fields an [`ExtractError`] refers to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QuoteField {
    Price,
    PreviousClose,
    MarketState,
    DisplayName,
}

impl QuoteField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::PreviousClose => "previous close",
            Self::MarketState => "market state",
            Self::DisplayName => "display name",
        }
    }
}

impl std::fmt::Display for QuoteField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while scraping one symbol out of a batch payload.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    /// The payload has no record for the requested symbol.
    #[error("Symbol not found in payload: {0}")]
    SymbolNotFound(String),

    /// The symbol's record lacks the marker for a field.
    #[error("{ticker}: missing {field}")]
    MissingField { ticker: String, field: QuoteField },

    /// The value has no terminator inside the record, or is longer than allowed.
    #[error("{ticker}: {field} is unterminated or longer than {max} bytes")]
    ValueTooLong {
        ticker: String,
        field: QuoteField,
        max: usize,
    },

    /// A numeric field has no parseable leading number.
    #[error("{ticker}: {field} is not a number: {value:?}")]
    InvalidNumber {
        ticker: String,
        field: QuoteField,
        value: String,
    },
}

impl ExtractError {
    /// The ticker the failed extraction was for.
    pub fn ticker(&self) -> &str {
        match self {
            Self::SymbolNotFound(ticker)
            | Self::MissingField { ticker, .. }
            | Self::ValueTooLong { ticker, .. }
            | Self::InvalidNumber { ticker, .. } => ticker,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_is_transient() {
        let error = FetchError::Timeout {
            provider: "YAHOO".to_string(),
        };
        assert!(error.is_transient());
    }

    #[test]
    fn test_http_status_transience() {
        let throttled = FetchError::HttpStatus {
            provider: "YAHOO".to_string(),
            status: 429,
        };
        let server = FetchError::HttpStatus {
            provider: "YAHOO".to_string(),
            status: 503,
        };
        let not_found = FetchError::HttpStatus {
            provider: "YAHOO".to_string(),
            status: 404,
        };
        assert!(throttled.is_transient());
        assert!(server.is_transient());
        assert!(!not_found.is_transient());
    }

    #[test]
    fn test_provider_error_is_not_transient() {
        let error = FetchError::ProviderError {
            provider: "YAHOO".to_string(),
            message: "bad crumb".to_string(),
        };
        assert!(!error.is_transient());
    }

    #[test]
    fn test_extract_error_ticker() {
        let error = ExtractError::MissingField {
            ticker: "AAPL".to_string(),
            field: QuoteField::Price,
        };
        assert_eq!(error.ticker(), "AAPL");
        assert_eq!(ExtractError::SymbolNotFound("MSFT".into()).ticker(), "MSFT");
    }

    #[test]
    fn test_error_display() {
        let error = FetchError::HttpStatus {
            provider: "YAHOO".to_string(),
            status: 401,
        };
        assert_eq!(format!("{}", error), "HTTP 401 from YAHOO");

        let error = ExtractError::MissingField {
            ticker: "AAPL".to_string(),
            field: QuoteField::MarketState,
        };
        assert_eq!(format!("{}", error), "AAPL: missing market state");

        let error = ExtractError::InvalidNumber {
            ticker: "AAPL".to_string(),
            field: QuoteField::Price,
            value: "null".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "AAPL: price is not a number: \"null\""
        );
    }
}

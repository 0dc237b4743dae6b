//! Authenticated HTTP session for the Yahoo Finance quote endpoint.
//!
//! The v7 quote endpoint rejects anonymous requests, so the session first
//! collects a cookie from `fc.yahoo.com`, exchanges it for a crumb, and then
//! sends both with every quote request. The pair is cached per session and
//! refreshed once when Yahoo answers 401.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, StatusCode};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use urlencoding::encode;

use crate::errors::FetchError;
use crate::provider::Transport;

const PROVIDER: &str = "YAHOO";

const COOKIE_URL: &str = "https://fc.yahoo.com";
const CRUMB_URL: &str = "https://query1.finance.yahoo.com/v1/test/getcrumb";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Cached Yahoo authentication data
#[derive(Debug, Clone)]
struct CrumbData {
    cookie: String,
    crumb: String,
}

/// reqwest-backed [`Transport`] that handles Yahoo's cookie/crumb handshake.
pub struct YahooTransport {
    client: reqwest::Client,
    crumb: RwLock<Option<CrumbData>>,
}

impl YahooTransport {
    /// Create a session whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            crumb: RwLock::new(None),
        })
    }

    // ========================================================================
    // Crumb/Cookie Authentication
    // ========================================================================

    /// Return the cached crumb, fetching one if needed.
    ///
    /// A failed handshake is not fatal: the request goes out without a crumb
    /// and Yahoo's answer decides whether the cycle fails.
    async fn ensure_crumb(&self) -> Option<CrumbData> {
        if let Some(crumb) = self.crumb.read().await.as_ref() {
            return Some(crumb.clone());
        }

        match self.fetch_crumb().await {
            Ok(crumb) => {
                *self.crumb.write().await = Some(crumb.clone());
                Some(crumb)
            }
            Err(e) => {
                debug!("Yahoo crumb handshake failed: {}", e);
                None
            }
        }
    }

    /// Fetch a new Yahoo authentication crumb.
    async fn fetch_crumb(&self) -> Result<CrumbData, FetchError> {
        // Step 1: Get cookie from fc.yahoo.com
        let response = self
            .client
            .get(COOKIE_URL)
            .send()
            .await
            .map_err(map_request_error)?;

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split_once(';').map(|(v, _)| v.to_string()))
            .ok_or_else(|| FetchError::ProviderError {
                provider: PROVIDER.to_string(),
                message: "Failed to parse Yahoo cookie".to_string(),
            })?;

        // Step 2: Get crumb using cookie
        let crumb = self
            .client
            .get(CRUMB_URL)
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .map_err(map_request_error)?
            .text()
            .await?;

        let crumb = crumb.trim().to_string();
        if crumb.is_empty() || crumb.contains('<') {
            return Err(FetchError::ProviderError {
                provider: PROVIDER.to_string(),
                message: "Yahoo returned an invalid crumb".to_string(),
            });
        }

        Ok(CrumbData { cookie, crumb })
    }

    /// Clear the cached crumb (used when authentication fails)
    async fn clear_crumb(&self) {
        *self.crumb.write().await = None;
    }

    async fn send(
        &self,
        url: &str,
        crumb: Option<&CrumbData>,
    ) -> Result<reqwest::Response, FetchError> {
        let request = match crumb {
            Some(crumb) => self
                .client
                .get(with_crumb(url, &crumb.crumb))
                .header(header::COOKIE, &crumb.cookie),
            None => self.client.get(url),
        };
        request.send().await.map_err(map_request_error)
    }
}

#[async_trait]
impl Transport for YahooTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let crumb = self.ensure_crumb().await;
        let mut response = self.send(url, crumb.as_ref()).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!("Yahoo authentication expired, refreshing crumb");
            self.clear_crumb().await;
            let crumb = self.ensure_crumb().await;
            response = self.send(url, crumb.as_ref()).await?;
        }

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                provider: PROVIDER.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(map_request_error)?;
        Ok(body.to_vec())
    }
}

/// Append the crumb query parameter to an endpoint URL.
fn with_crumb(url: &str, crumb: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}crumb={}", url, separator, encode(crumb))
}

fn map_request_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            provider: PROVIDER.to_string(),
        }
    } else {
        FetchError::Network(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_crumb_appends_parameter() {
        assert_eq!(
            with_crumb("https://example.test/q?symbols=A", "abc"),
            "https://example.test/q?symbols=A&crumb=abc"
        );
        assert_eq!(
            with_crumb("https://example.test/q", "abc"),
            "https://example.test/q?crumb=abc"
        );
    }

    #[test]
    fn test_with_crumb_encodes_value() {
        assert_eq!(
            with_crumb("https://example.test/q?x=1", "a/b.c"),
            "https://example.test/q?x=1&crumb=a%2Fb.c"
        );
    }

    #[tokio::test]
    async fn test_new_session_has_no_crumb() {
        let transport = YahooTransport::new(Duration::from_secs(5)).unwrap();
        assert!(transport.crumb.read().await.is_none());
    }
}

//! HTTP client for the bulk congressional trading feed.

use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::Error;

/// Production endpoint returning every known congressional trade disclosure.
pub const BULK_CONGRESS_TRADING_URL: &str =
    "https://api.quiverquant.com/beta/bulk/congresstrading";

/// Default bound on the whole request, including reading the body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(45);

/// HTTP client for the bulk disclosure feed.
///
/// Every request carries `Authorization: Bearer <token>`. The token has no
/// default; callers must supply it. Each request builds a fresh
/// `reqwest::Client` bounded by the configured timeout.
pub struct Client {
    /// Full URL of the bulk endpoint.
    feed_url: String,
    token: String,
    timeout: Duration,
}

impl Client {
    /// Creates a client pointing at the production bulk endpoint.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_url(BULK_CONGRESS_TRADING_URL, token)
    }

    /// Creates a client with a custom feed URL. Used for testing with wiremock.
    pub fn with_url(feed_url: &str, token: impl Into<String>) -> Self {
        Self {
            feed_url: feed_url.to_string(),
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Replaces the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    fn get_url(&self) -> Result<Url, Error> {
        Url::parse(&self.feed_url).map_err(|e| {
            tracing::error!("Invalid feed URL {}: {}", self.feed_url, e);
            Error::RequestFailed
        })
    }

    fn map_send_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            tracing::error!("Feed request timed out after {}s", self.timeout.as_secs());
            Error::Timeout(self.timeout)
        } else {
            tracing::error!("Failed to get feed: {}", e);
            Error::RequestFailed
        }
    }

    /// Fetches the whole feed and decodes it as a JSON array.
    ///
    /// The response body is released before this returns; callers only ever
    /// hold the decoded elements.
    pub async fn get_bulk_trades(&self) -> Result<Vec<Value>, Error> {
        let url = self.get_url()?;
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let resp = client
            .get(url)
            .header("accept", "application/json")
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Feed request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed = serde_json::from_str::<Vec<Value>>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse feed: {} | body: {}", e, snippet);
            Error::Parse(e.to_string())
        });
        drop(body);

        let records = parsed?;
        tracing::debug!("Decoded {} feed records", records.len());
        Ok(records)
    }
}

/// Cuts a body down to a loggable prefix without splitting a UTF-8 character.
fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    match body.char_indices().nth(MAX) {
        None => body.to_string(),
        Some((idx, _)) => format!("{}...[truncated]", &body[..idx]),
    }
}

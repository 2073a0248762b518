//! Error types for the feed client.

use std::time::Duration;

/// Errors that can occur when fetching the bulk feed.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (connection error or unreadable response).
    #[error("Request failed")]
    RequestFailed,
    /// The request did not complete within the configured timeout.
    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The response body was not a JSON array.
    #[error("Failed to parse response body: {0}")]
    Parse(String),
}

impl Error {
    /// True when the failure happened before a response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::RequestFailed | Self::Timeout(_))
    }
}

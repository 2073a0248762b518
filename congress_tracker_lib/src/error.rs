//! Error types for the ingestion pipeline.

use thiserror::Error;

/// Failures inside a single pipeline step.
///
/// None of these are fatal to the process: every public step operation
/// catches them, logs, and substitutes an empty or fallback collection.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A file or endpoint that should hold the data is absent.
    #[error("Source not found: {0}")]
    MissingSource(String),
    /// A single record could not be interpreted.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),
    /// Timeout, connection error, or non-success response on the feed fetch.
    #[error("Transport failure: {0}")]
    TransportFailure(String),
    /// A file could not be read, written, encoded, or decoded.
    #[error("Serialization failure: {0}")]
    SerializationFailure(String),
}

impl From<congress_feed_api::Error> for PipelineError {
    fn from(e: congress_feed_api::Error) -> Self {
        match e {
            congress_feed_api::Error::HttpStatus { status: 404, .. } => {
                Self::MissingSource(e.to_string())
            }
            congress_feed_api::Error::Parse(msg) => Self::SerializationFailure(msg),
            other => Self::TransportFailure(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerializationFailure(e.to_string())
    }
}

impl From<serde_yml::Error> for PipelineError {
    fn from(e: serde_yml::Error) -> Self {
        Self::SerializationFailure(e.to_string())
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            Self::MissingSource(e.to_string())
        } else {
            Self::SerializationFailure(e.to_string())
        }
    }
}

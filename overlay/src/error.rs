//! Error types for overlay operations.
//!
//! Failures here are recoverable by design: a fetch or decode problem
//! degrades to an empty point batch at the cache layer, so nothing in this
//! module should ever take down a host page. The error type exists for the
//! layers below the cache (source, config) where the caller still decides.

/// Result type for overlay operations.
pub type OverlayResult<T> = Result<T, OverlayError>;

/// Error type for overlay operations.
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    /// Transport-level failure talking to the thermal endpoint.
    #[error("source error: {0}")]
    Source(String),

    /// Response arrived but could not be decoded into thermal points.
    #[error("decode error: {0}")]
    Decode(String),

    /// Configuration file missing or malformed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal/unexpected errors (e.g. a processing task panicked).
    #[error("internal error: {0}")]
    Internal(String),
}

impl OverlayError {
    /// Create a source error.
    pub fn source(message: impl Into<String>) -> Self {
        Self::Source(message.into())
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl From<serde_json::Error> for OverlayError {
    fn from(err: serde_json::Error) -> Self {
        OverlayError::decode(err.to_string())
    }
}

#[cfg(feature = "http-source")]
impl From<reqwest::Error> for OverlayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            OverlayError::decode(err.to_string())
        } else {
            OverlayError::source(err.to_string())
        }
    }
}

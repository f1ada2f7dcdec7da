use std::time::Duration;

use thiserror::Error;

/// ntfy Client Error Types
#[derive(Error, Debug)]
pub enum NtfyError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to join relay URL: {0}")]
    UrlConstruction(String),

    #[error("Relay request failed: {0}")]
    Transport(String),

    #[error("Relay response not ok: {status}")]
    ServerRejected { status: String },

    #[error("Failed to read relay response body: {0}")]
    Io(String),
}

impl From<NtfyError> for String {
    fn from(err: NtfyError) -> Self {
        err.to_string()
    }
}

/// Failures reported by an [`HttpTransport`](crate::transport::HttpTransport)
/// or by the send context wrapping it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("context cancelled")]
    Cancelled,

    #[error("context deadline exceeded")]
    DeadlineExceeded,

    #[error("failed to build HTTP client: {0}")]
    Build(String),
}

impl TransportError {
    /// True when the failure came from the caller's context rather than the network.
    pub fn is_context_error(&self) -> bool {
        matches!(self, TransportError::Cancelled | TransportError::DeadlineExceeded)
    }
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("Request timeout must be greater than zero, got {0:?}")]
    ZeroTimeout(Duration),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

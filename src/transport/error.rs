//! Transport error types

use thiserror::Error;

/// Failure of a backend call
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Network, message)
    }

    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Status(code), message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Decode, message)
    }

    pub fn invalid_url(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::InvalidUrl, message)
    }
}

/// Error classification, for logging only; callers never branch on it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Connection refused, DNS, timeouts
    Network,
    /// Backend answered with a non-2xx status
    Status(u16),
    /// Response body did not match the expected shape
    Decode,
    /// Base URL or path could not be built
    InvalidUrl,
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            TransportError::decode(format!("Invalid response body: {e}"))
        } else if let Some(status) = e.status() {
            TransportError::status(status.as_u16(), e.to_string())
        } else {
            TransportError::network(format!("Request failed: {e}"))
        }
    }
}

//! Error types and error handling for the Unity IDM client.
//!
//! Transport failures and error HTTP statuses are kept as distinct variants
//! so callers can discriminate between "no response" and "error response".
//! [`UnityError::is_request_failure`] covers both for callers that want to
//! treat them as one request-failed signal.

use thiserror::Error;

/// The main error type for the Unity IDM client.
#[derive(Debug, Error)]
pub enum UnityError {
    /// Configuration is invalid or the HTTP client could not be built.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Connection could not be established or was interrupted before a
    /// complete response was received.
    #[error("Transport error for {url}")]
    Transport {
        url: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The server answered with a non-2xx status.
    #[error("HTTP status {status} for {url}")]
    HttpStatus {
        status: u16,
        url: String,
        /// Raw response body, kept for diagnostics.
        body: String,
    },

    /// The response body was not valid JSON.
    #[error("JSON decoding error: {0}")]
    Json(#[from] serde_json::Error),
}

impl UnityError {
    /// Creates a configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        UnityError::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a configuration error with a message and source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        UnityError::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a transport error for the given request URL.
    pub fn transport(url: impl Into<String>) -> Self {
        UnityError::Transport {
            url: url.into(),
            source: None,
        }
    }

    /// Creates a transport error with a source.
    pub fn transport_with_source(
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        UnityError::Transport {
            url: url.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an HTTP status error from a response.
    pub fn http_status(status: u16, url: impl Into<String>, body: impl Into<String>) -> Self {
        UnityError::HttpStatus {
            status,
            url: url.into(),
            body: body.into(),
        }
    }

    /// Returns true for failures of the request itself: no response received,
    /// or an error status received. Decoding errors are not request failures.
    pub fn is_request_failure(&self) -> bool {
        matches!(
            self,
            UnityError::Transport { .. } | UnityError::HttpStatus { .. }
        )
    }
}

/// Result type alias for Unity IDM client operations.
pub type Result<T> = std::result::Result<T, UnityError>;

//! Error types for outbound API calls.

use thiserror::Error;

use crate::models::ValidationError;

/// Error type for a single HTTP exchange.
///
/// Describes what went wrong at the transport level, before any response
/// was obtained. Whether to retry is decided by the classifier.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// connection resets and body read failures.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The request URL could not be built.
    ///
    /// A configuration problem rather than a transient failure.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl HttpError {
    /// Returns true if the failure is transient (worth another attempt).
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout)
    }
}

/// Final outcome of a failed API call.
///
/// Exactly one variant describes why the call did not produce a payload.
/// The retry loop surfaces the last observed failure as-is; there is no
/// separate "retries exhausted" variant.
#[derive(Debug, Error)]
pub enum RestError {
    /// The API answered with an error status or an error envelope.
    #[error("AbacatePay API error on {route}: {message}")]
    Api {
        /// Route that returned the error (e.g. `/store/get`)
        route: String,
        /// Error message reported by the API, or derived from the status
        message: String,
        /// HTTP status of the response
        status: http::StatusCode,
    },

    /// No response was obtained (timeout, connection failure, bad URL).
    #[error("HTTP error on {route}: {message}")]
    Transport {
        /// Route that was being requested
        route: String,
        /// Description of the transport failure
        message: String,
    },

    /// A successful response did not match the expected payload shape.
    #[error("Unexpected response payload on {route}: {message}")]
    Decode {
        /// Route that returned the payload
        route: String,
        /// Deserialization failure
        message: String,
    },

    /// The request body could not be serialized; nothing was sent.
    #[error("Failed to serialize request body for {route}: {source}")]
    Serialize {
        /// Route the body was meant for
        route: String,
        /// Underlying serde error
        #[source]
        source: serde_json::Error,
    },

    /// The request body violates a documented constraint; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl RestError {
    /// Creates an `Api` error.
    #[must_use]
    pub fn api(route: &str, status: http::StatusCode, message: impl Into<String>) -> Self {
        Self::Api {
            route: route.to_string(),
            message: message.into(),
            status,
        }
    }

    /// Creates a `Transport` error from an [`HttpError`].
    #[must_use]
    pub fn transport(route: &str, error: &HttpError) -> Self {
        Self::Transport {
            route: route.to_string(),
            message: error.to_string(),
        }
    }

    /// Returns the route involved, when the error is tied to one.
    #[must_use]
    pub fn route(&self) -> Option<&str> {
        match self {
            Self::Api { route, .. }
            | Self::Transport { route, .. }
            | Self::Decode { route, .. }
            | Self::Serialize { route, .. } => Some(route),
            Self::Validation(_) => None,
        }
    }

    /// Returns the HTTP status for `Api` errors.
    #[must_use]
    pub const fn status(&self) -> Option<http::StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true for failures where no response was obtained.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

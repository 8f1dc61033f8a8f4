//! Error types for the webhook pipeline.

use http::StatusCode;
use thiserror::Error;

use super::HandlerError;

/// Setup errors raised when a gateway is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookConfigError {
    /// No webhook secret was configured.
    #[error("Webhook secret is missing. Set ABACATEPAY_WEBHOOK_SECRET.")]
    MissingSecret,
}

impl WebhookConfigError {
    /// Stable machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingSecret => "WEBHOOK_SECRET_MISSING",
        }
    }
}

/// Why an inbound notification was not accepted.
///
/// Every variant maps to a status code and a public message. The public
/// message is the only text sent back to the caller; the `Display` output
/// may carry internal detail and is meant for logs.
#[derive(Debug, Error)]
pub enum WebhookRejection {
    /// The `webhookSecret` query parameter is absent or wrong.
    #[error("Webhook secret mismatch")]
    Unauthorized,

    /// The `x-webhook-signature` header is absent.
    #[error("Missing x-webhook-signature header")]
    MissingSignature,

    /// The signature does not match the raw body.
    #[error("Webhook signature verification failed")]
    InvalidSignature,

    /// The body is not JSON.
    #[error("Webhook body is not valid JSON: {0}")]
    InvalidJson(String),

    /// The body is JSON but not a known event.
    #[error("Webhook body does not match any known event: {0}")]
    InvalidPayload(String),

    /// The handler returned an error.
    #[error("Webhook handler failed: {0}")]
    Handler(#[source] HandlerError),
}

impl WebhookRejection {
    /// HTTP status to answer with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized | Self::InvalidSignature => StatusCode::UNAUTHORIZED,
            Self::MissingSignature | Self::InvalidJson(_) | Self::InvalidPayload(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Handler(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to the sender.
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::Unauthorized => "Unauthorized",
            Self::MissingSignature => "Missing signature",
            Self::InvalidSignature => "Invalid signature",
            Self::InvalidJson(_) => "Invalid JSON",
            Self::InvalidPayload(_) => "Invalid payload",
            Self::Handler(_) => "Internal server error",
        }
    }

    /// Returns true when the sender is at fault (4xx).
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Handler(_))
    }
}

/// An `event` string outside the version's closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown webhook event type: {0}")]
pub struct UnknownEventType(pub String);

//! Inbound side of the SDK: verifying and dispatching webhook notifications.
//!
//! A notification travels through four stages, composed by
//! [`WebhookGateway`]:
//!
//! 1. the `webhookSecret` query parameter is compared with the configured secret
//! 2. the `x-webhook-signature` header is checked over the raw body ([`SignatureVerifier`])
//! 3. the body is parsed into the versioned event union ([`parse`])
//! 4. the event is routed to exactly one handler ([`HandlerRegistry`])
//!
//! Event unions are closed per API version: see [`v1::Event`] and
//! [`v2::Event`]. Host frameworks plug in through [`WebhookRequest`]; an
//! adapter for [`http::Request`] ships with the crate.

mod adapter;
mod dispatch;
mod error;
mod gateway;
mod payload;
mod signature;
pub mod v1;
pub mod v2;

#[cfg(test)]
mod adapter_tests;
#[cfg(test)]
mod dispatch_tests;
#[cfg(test)]
mod signature_tests;
#[cfg(test)]
mod test_fixtures;

use std::fmt;
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::models::{Paid, PaymentMethod, PixKind};

pub use adapter::{RawWebhookRequest, WebhookRequest, handle_http, into_http_response};
pub use dispatch::{
    Dispatch, EventHandler, FnHandler, HandlerError, HandlerRegistry, HandlerRegistryBuilder,
    handler_fn,
};
pub use error::{UnknownEventType, WebhookConfigError, WebhookRejection};
pub use gateway::{SECRET_QUERY_PARAM, WebhookConfig, WebhookGateway};
pub use payload::{ParseResult, parse};
pub use signature::{SIGNATURE_HEADER, SignatureVerifier};

/// A member of a versioned webhook event union.
pub trait WebhookEvent: DeserializeOwned + Send + 'static {
    /// Closed set of `event` discriminants for this version.
    type EventType: Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// The `event` discriminant.
    fn event_type(&self) -> Self::EventType;

    /// Unique identifier of the notification.
    fn id(&self) -> &str;

    /// Whether the event happened in development mode.
    fn dev_mode(&self) -> bool;
}

/// Fields shared by every notification, around a variant-specific `data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<D> {
    /// Notification identifier (`log_...`)
    pub id: String,
    /// True for events from development mode
    pub dev_mode: bool,
    pub data: D,
}

/// Amount, fee and method of a settled payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSummary {
    /// Amount in cents
    pub amount: i64,
    /// Fee charged by AbacatePay, in cents
    pub fee: i64,
    pub method: PaymentMethod,
}

/// PIX QR code settled by a `billing.paid` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaidPixQrCode {
    /// Amount in cents
    pub amount: i64,
    pub id: String,
    pub kind: PixKind,
    pub status: Paid,
}

/// `data` of withdraw/payout events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionData<T> {
    pub transaction: T,
}

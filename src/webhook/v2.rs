//! Webhook events of API v2.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::{
    Envelope, PaidPixQrCode, PaymentSummary, TransactionData, UnknownEventType, WebhookEvent,
};
use crate::models::{Cancelled, Complete, Paid};

/// `event` discriminants of API v2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "billing.paid")]
    BillingPaid,
    #[serde(rename = "payout.done")]
    PayoutDone,
    #[serde(rename = "payout.failed")]
    PayoutFailed,
}

impl EventType {
    /// Every event type of this version.
    pub const ALL: [Self; 3] = [Self::BillingPaid, Self::PayoutDone, Self::PayoutFailed];

    /// Wire name of the event.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BillingPaid => "billing.paid",
            Self::PayoutDone => "payout.done",
            Self::PayoutFailed => "payout.failed",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = UnknownEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event_type| event_type.as_str() == s)
            .ok_or_else(|| UnknownEventType(s.to_string()))
    }
}

/// A v2 webhook notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum Event {
    #[serde(rename = "billing.paid")]
    BillingPaid(Envelope<BillingPaid>),
    #[serde(rename = "payout.done")]
    PayoutDone(Envelope<TransactionData<PayoutTransaction<Complete>>>),
    #[serde(rename = "payout.failed")]
    PayoutFailed(Envelope<TransactionData<PayoutTransaction<Cancelled>>>),
}

impl WebhookEvent for Event {
    type EventType = EventType;

    fn event_type(&self) -> EventType {
        match self {
            Self::BillingPaid(_) => EventType::BillingPaid,
            Self::PayoutDone(_) => EventType::PayoutDone,
            Self::PayoutFailed(_) => EventType::PayoutFailed,
        }
    }

    fn id(&self) -> &str {
        match self {
            Self::BillingPaid(envelope) => &envelope.id,
            Self::PayoutDone(envelope) => &envelope.id,
            Self::PayoutFailed(envelope) => &envelope.id,
        }
    }

    fn dev_mode(&self) -> bool {
        match self {
            Self::BillingPaid(envelope) => envelope.dev_mode,
            Self::PayoutDone(envelope) => envelope.dev_mode,
            Self::PayoutFailed(envelope) => envelope.dev_mode,
        }
    }
}

/// `data` of `billing.paid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPaid {
    pub payment: PaidPayment,
}

/// Settled payment and what it paid for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaidPayment {
    pub payment: PaymentSummary,
    #[serde(flatten)]
    pub source: PaymentSource,
}

/// What a `billing.paid` event settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaymentSource {
    /// A PIX QR code.
    PixQrCode {
        #[serde(rename = "pixQrCode")]
        pix_qr_code: PaidPixQrCode,
    },
    /// A checkout.
    Billing { billing: PaidBilling },
}

/// Checkout settled by a `billing.paid` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaidBilling {
    /// Amount in cents
    pub amount: i64,
    pub id: String,
    pub external_id: String,
    pub status: Paid,
    pub url: Url,
}

/// Payout carried by `payout.*` events; `S` pins the literal status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutTransaction<S> {
    pub id: String,
    pub status: S,
    pub dev_mode: bool,
    #[serde(deserialize_with = "crate::models::nullable")]
    pub receipt_url: Option<Url>,
    /// Amount in cents
    pub amount: i64,
    pub platform_fee: i64,
    pub external_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//! Webhook events of API v1.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::{
    Envelope, PaidPixQrCode, PaymentSummary, TransactionData, UnknownEventType, WebhookEvent,
};
use crate::models::v1::Customer;
use crate::models::{Cancelled, Complete, Paid, PaymentFrequency, PaymentMethod, WithdrawKind};

/// `event` discriminants of API v1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "billing.paid")]
    BillingPaid,
    #[serde(rename = "withdraw.done")]
    WithdrawDone,
    #[serde(rename = "withdraw.failed")]
    WithdrawFailed,
}

impl EventType {
    /// Every event type of this version.
    pub const ALL: [Self; 3] = [Self::BillingPaid, Self::WithdrawDone, Self::WithdrawFailed];

    /// Wire name of the event.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BillingPaid => "billing.paid",
            Self::WithdrawDone => "withdraw.done",
            Self::WithdrawFailed => "withdraw.failed",
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

/// A v1 webhook notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum Event {
    #[serde(rename = "billing.paid")]
    BillingPaid(Envelope<BillingPaid>),
    #[serde(rename = "withdraw.done")]
    WithdrawDone(Envelope<TransactionData<WithdrawTransaction<Complete>>>),
    #[serde(rename = "withdraw.failed")]
    WithdrawFailed(Envelope<TransactionData<WithdrawTransaction<Cancelled>>>),
}

impl WebhookEvent for Event {
    type EventType = EventType;

    fn event_type(&self) -> EventType {
        match self {
            Self::BillingPaid(_) => EventType::BillingPaid,
            Self::WithdrawDone(_) => EventType::WithdrawDone,
            Self::WithdrawFailed(_) => EventType::WithdrawFailed,
        }
    }

    fn id(&self) -> &str {
        match self {
            Self::BillingPaid(envelope) => &envelope.id,
            Self::WithdrawDone(envelope) => &envelope.id,
            Self::WithdrawFailed(envelope) => &envelope.id,
        }
    }

    fn dev_mode(&self) -> bool {
        match self {
            Self::BillingPaid(envelope) => envelope.dev_mode,
            Self::WithdrawDone(envelope) => envelope.dev_mode,
            Self::WithdrawFailed(envelope) => envelope.dev_mode,
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
    /// A billing.
    Billing(Box<PaidBilling>),
}

/// Billing settled by a `billing.paid` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaidBilling {
    pub billing: BillingSummary,
    pub customer: Customer,
    pub frequency: PaymentFrequency,
    pub kind: Vec<PaymentMethod>,
    /// Amount paid in cents
    pub paid_amount: i64,
    pub products: PaidProduct,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingSummary {
    /// Amount in cents
    pub amount: i64,
    pub id: String,
    pub status: Paid,
    pub coupons_used: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaidProduct {
    pub quantity: i64,
    pub external_id: String,
    pub id: String,
}

/// Withdraw carried by `withdraw.*` events; `S` pins the literal status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawTransaction<S> {
    pub id: String,
    pub status: S,
    pub dev_mode: bool,
    pub receipt_url: Url,
    /// Amount in cents
    pub amount: i64,
    pub platform_fee: i64,
    #[serde(default)]
    pub external_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub kind: WithdrawKind,
}

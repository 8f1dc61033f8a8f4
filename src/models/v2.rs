//! API v2 resources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::{Metadata, PaymentMethod, PaymentStatus, TransactionStatus};

/// A customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub dev_mode: bool,
    pub country: String,
    pub name: String,
    pub email: String,
    /// CPF or CNPJ
    pub tax_id: String,
    pub cellphone: String,
    pub zip_code: String,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

/// One line of a checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutItem {
    /// Product identifier
    pub id: String,
    /// At least 1
    pub quantity: i64,
}

/// A hosted checkout (billing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkout {
    pub id: String,
    /// Total in cents, at least 100
    pub amount: i64,
    /// `None` until paid
    pub paid_amount: Option<i64>,
    pub external_id: Option<String>,
    pub url: Url,
    pub items: Vec<CheckoutItem>,
    pub status: PaymentStatus,
    pub dev_mode: bool,
    #[serde(default)]
    pub metadata: Metadata,
    pub return_url: Url,
    pub completion_url: Url,
    pub receipt_url: Option<Url>,
    #[serde(default)]
    pub coupons: Vec<String>,
    pub customer_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    Active,
    Inactive,
}

/// A catalogue product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub external_id: String,
    pub name: String,
    /// Price in cents
    pub price: i64,
    pub currency: String,
    pub status: ProductStatus,
    pub dev_mode: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub description: Option<String>,
}

/// A PIX QR code charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixQrCode {
    pub id: String,
    /// Amount in cents
    pub amount: i64,
    pub status: PaymentStatus,
    pub dev_mode: bool,
    pub br_code: String,
    pub br_code_base64: String,
    pub platform_fee: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// A payout transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payout {
    pub id: String,
    pub status: TransactionStatus,
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

/// Subscription lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionStatus {
    Active,
    Pending,
    Cancelled,
    Expired,
    Failed,
}

/// Billing cycle of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Cycle {
    Monthly,
    Yearly,
    Weekly,
    Daily,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frequency {
    pub cycle: Cycle,
}

/// Charge retry settings of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRetryPolicy {
    /// Maximum billing attempts
    pub max_retry: i64,
    /// Days between attempts
    pub retry_every: i64,
}

/// Entry of a subscription's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionEvent {
    pub event: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// A recurring subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    /// Amount in cents
    pub amount: i64,
    pub currency: String,
    pub name: String,
    pub description: String,
    pub external_id: String,
    pub dev_mode: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub method: PaymentMethod,
    pub status: SubscriptionStatus,
    pub frequency: Frequency,
    /// Day of the month the charge is processed (1-31)
    pub day_of_processing: i64,
    pub customer_id: String,
    pub retry_policy: SubscriptionRetryPolicy,
    #[serde(default)]
    pub events: Vec<SubscriptionEvent>,
}


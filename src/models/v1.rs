//! API v1 resources and request bodies.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::{
    MAX_COUPONS, MIN_PRICE_CENTS, Metadata, PaymentFrequency, PaymentMethod, PaymentStatus,
    PixKind, TransactionStatus, Validate, ValidationError, WithdrawKind, ensure_len, ensure_max,
    ensure_min,
};

/// A customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Customer identifier (`cust_...`)
    pub id: String,
    /// Contact data
    pub metadata: CustomerMetadata,
}

/// Contact data of a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerMetadata {
    pub name: String,
    pub email: String,
    /// CPF or CNPJ
    pub tax_id: String,
    pub cellphone: String,
}

/// Body of `customers.create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomer {
    pub name: String,
    pub cellphone: String,
    pub email: String,
    /// CPF or CNPJ
    pub tax_id: String,
}

/// A product line in a billing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product id in the merchant's system
    pub external_id: String,
    pub name: String,
    /// Units purchased, at least 1
    pub quantity: i64,
    /// Unit price in cents, at least 100
    pub price: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    fn validate_at(&self, index: usize) -> Result<(), ValidationError> {
        ensure_min(format!("products[{index}].quantity"), self.quantity, 1)?;
        ensure_min(format!("products[{index}].price"), self.price, MIN_PRICE_CENTS)
    }
}

impl Validate for Product {
    fn validate(&self) -> Result<(), ValidationError> {
        ensure_min("quantity", self.quantity, 1)?;
        ensure_min("price", self.price, MIN_PRICE_CENTS)
    }
}

/// Redirect URLs and fee of a billing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeMetadata {
    /// Fee applied by AbacatePay, in cents
    pub fee: f64,
    pub return_url: Url,
    pub completion_url: Url,
}

/// A billing (charge).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charge {
    /// Billing identifier (`bill_...`)
    pub id: String,
    pub frequency: PaymentFrequency,
    pub external_id: Option<String>,
    /// Payment page
    pub url: Url,
    pub status: PaymentStatus,
    pub dev_mode: bool,
    pub metadata: ChargeMetadata,
    pub methods: Vec<PaymentMethod>,
    pub products: Vec<Product>,
    #[serde(default)]
    pub customer: Option<Customer>,
    /// Next charge date, `None` for one-time billings
    pub next_billing: Option<DateTime<Utc>>,
    #[serde(default)]
    pub allow_coupons: Option<bool>,
    #[serde(default)]
    pub coupons: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `billings.create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCharge {
    pub frequency: PaymentFrequency,
    pub methods: Vec<PaymentMethod>,
    pub products: Vec<Product>,
    pub return_url: Url,
    pub completion_url: Url,
    /// Existing customer to bill
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Customer created together with the billing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<CreateCustomer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_coupons: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coupons: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

impl Validate for CreateCharge {
    fn validate(&self) -> Result<(), ValidationError> {
        ensure_len("products", self.products.len(), 1, usize::MAX)?;
        for (index, product) in self.products.iter().enumerate() {
            product.validate_at(index)?;
        }
        ensure_len("coupons", self.coupons.len(), 0, MAX_COUPONS)
    }
}

/// A PIX QR code charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixQrCode {
    /// Identifier (`pix_char_...`)
    pub id: String,
    /// Amount in cents
    pub amount: i64,
    pub status: PaymentStatus,
    pub dev_mode: bool,
    pub method: PixKind,
    /// Copy-and-paste PIX code
    pub br_code: String,
    /// QR code image, base64 encoded
    pub br_code_base64: String,
    pub platform_fee: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub metadata: Metadata,
}

/// Body of `pix.create`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePixQrCode {
    /// Amount in cents
    pub amount: i64,
    /// Seconds until the code expires
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<CreateCustomer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Result of `pix.status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixStatus {
    pub status: PaymentStatus,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// A withdraw transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Withdraw {
    /// Transaction identifier (`tran_...`)
    pub id: String,
    pub status: TransactionStatus,
    pub dev_mode: bool,
    /// Proof of transfer
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

/// PIX key type of a withdraw destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PixKeyType {
    Cpf,
    Cnpj,
    Phone,
    Email,
    Random,
    BrCode,
}

/// Destination PIX key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixKey {
    #[serde(rename = "type")]
    pub kind: PixKeyType,
    pub key: String,
}

/// Body of `withdraw.create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWithdraw {
    /// Idempotency identifier in the merchant's system
    pub external_id: String,
    pub method: PixKind,
    /// Amount in cents
    pub amount: i64,
    pub pix: PixKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Validate for CreateWithdraw {
    fn validate(&self) -> Result<(), ValidationError> {
        ensure_min("amount", self.amount, 1)
    }
}

/// How a coupon discount is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountKind {
    Percentage,
    Fixed,
}

/// A discount coupon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Coupon code, which is also its identifier
    pub id: String,
    pub discount_kind: DiscountKind,
    /// Percentage or amount in cents, depending on `discount_kind`
    pub discount: i64,
    /// `ACTIVE`, `INACTIVE` or `EXPIRED`
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
    /// `-1` for unlimited
    #[serde(default)]
    pub max_redeems: Option<i64>,
    #[serde(default)]
    pub redeems_count: Option<i64>,
    #[serde(default)]
    pub dev_mode: bool,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `coupons.create`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCoupon {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// `-1` for unlimited
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_redeems: Option<i64>,
    pub discount_kind: DiscountKind,
    pub discount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Validate for CreateCoupon {
    fn validate(&self) -> Result<(), ValidationError> {
        ensure_min("discount", self.discount, 1)?;
        if self.discount_kind == DiscountKind::Percentage {
            ensure_max("discount", self.discount, 100)?;
        }
        if let Some(max_redeems) = self.max_redeems {
            ensure_min("maxRedeems", max_redeems, -1)?;
        }
        Ok(())
    }
}

/// Monthly recurring revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mrr {
    /// MRR in cents
    pub mrr: i64,
    pub total_active_subscriptions: i64,
}

/// Public merchant information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Merchant {
    pub name: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Revenue over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Revenue {
    /// Total in cents
    pub total_revenue: i64,
    pub total_transactions: i64,
    /// Keyed by day (`YYYY-MM-DD`)
    #[serde(rename = "transactionPerDay", default)]
    pub transactions_per_day: BTreeMap<String, DailyRevenue>,
}

/// Revenue of a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRevenue {
    /// Amount in cents
    pub amount: i64,
    pub count: i64,
}

//! Resource models of the AbacatePay API.
//!
//! Plain serde structures mirroring the API's JSON (camelCase on the wire).
//! Version-specific resources live in [`v1`] and [`v2`]; the types here are
//! shared by both versions and by the webhook event unions.
//!
//! Request bodies with documented bounds implement [`Validate`]; the domain
//! client checks them before any network I/O.

pub mod v1;
pub mod v2;


use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Deserializes an `Option` field whose key must be present, even if `null`.
///
/// Use with `#[serde(deserialize_with = "crate::models::nullable")]`; a
/// plain `Option` field would also accept a missing key.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

/// A request body violates a documented constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A numeric field is below its minimum.
    #[error("{field} must be at least {min}, got {actual}")]
    BelowMinimum {
        /// Field path (e.g. `products[0].price`)
        field: String,
        /// Smallest accepted value
        min: i64,
        /// Value that was provided
        actual: i64,
    },

    /// A numeric field is above its maximum.
    #[error("{field} must be at most {max}, got {actual}")]
    AboveMaximum {
        /// Field path
        field: String,
        /// Largest accepted value
        max: i64,
        /// Value that was provided
        actual: i64,
    },

    /// A list that needs entries is empty.
    #[error("{field} must contain at least one entry")]
    Empty {
        /// Field path
        field: String,
    },

    /// A list has more entries than allowed.
    #[error("{field} accepts at most {max} entries, got {actual}")]
    TooManyEntries {
        /// Field path
        field: String,
        /// Largest accepted length
        max: usize,
        /// Length that was provided
        actual: usize,
    },
}

impl ValidationError {
    /// Returns the offending field path.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::BelowMinimum { field, .. }
            | Self::AboveMaximum { field, .. }
            | Self::Empty { field }
            | Self::TooManyEntries { field, .. } => field,
        }
    }
}

/// Local checks for documented constraints that serde cannot express.
pub trait Validate {
    /// Checks the value.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    fn validate(&self) -> Result<(), ValidationError>;
}

pub(crate) fn ensure_min(field: impl Into<String>, actual: i64, min: i64) -> Result<(), ValidationError> {
    if actual < min {
        return Err(ValidationError::BelowMinimum {
            field: field.into(),
            min,
            actual,
        });
    }
    Ok(())
}

pub(crate) fn ensure_max(field: impl Into<String>, actual: i64, max: i64) -> Result<(), ValidationError> {
    if actual > max {
        return Err(ValidationError::AboveMaximum {
            field: field.into(),
            max,
            actual,
        });
    }
    Ok(())
}

pub(crate) fn ensure_len(
    field: &str,
    len: usize,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    if len < min {
        return Err(ValidationError::Empty {
            field: field.to_string(),
        });
    }
    if len > max {
        return Err(ValidationError::TooManyEntries {
            field: field.to_string(),
            max,
            actual: len,
        });
    }
    Ok(())
}

/// Maximum number of coupon codes a billing accepts.
pub const MAX_COUPONS: usize = 50;

/// Minimum price of a product, in cents (1 BRL).
pub const MIN_PRICE_CENTS: i64 = 100;

/// Free-form metadata attached to resources.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Billing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Expired,
    Cancelled,
    Paid,
    Refunded,
}

/// Payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Pix,
    Card,
}

/// Billing frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentFrequency {
    OneTime,
    MultiplePayments,
}

/// Withdraw (v1) and payout (v2) transaction status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Expired,
    Cancelled,
    Complete,
    Refunded,
}

/// Literal `"PAID"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Paid {
    #[default]
    #[serde(rename = "PAID")]
    Paid,
}

/// Literal `"COMPLETE"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Complete {
    #[default]
    #[serde(rename = "COMPLETE")]
    Complete,
}

/// Literal `"CANCELLED"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cancelled {
    #[default]
    #[serde(rename = "CANCELLED")]
    Cancelled,
}

/// Literal `"PIX"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PixKind {
    #[default]
    #[serde(rename = "PIX")]
    Pix,
}

/// Literal `"WITHDRAW"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WithdrawKind {
    #[default]
    #[serde(rename = "WITHDRAW")]
    Withdraw,
}

/// Store details, identical in both API versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    /// Store identifier
    pub id: String,
    /// Store or company name
    pub name: String,
    /// Account balances
    pub balance: Balance,
}

/// Account balances in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Available for withdrawal
    pub available: i64,
    /// Pending confirmation
    pub pending: i64,
    /// Blocked in disputes
    pub blocked: i64,
}

//! Domain-oriented client for API v1.
//!
//! [`AbacatePay`] wraps a [`Rest`] executor pinned to version 1 and groups
//! the endpoints by resource:
//!
//! ```no_run
//! use abacatepay::api::AbacatePay;
//!
//! # async fn example() -> Result<(), abacatepay::rest::RestError> {
//! let client = AbacatePay::new("abc_dev_123");
//! let store = client.store().get().await?;
//! let billings = client.billings().list().await?;
//! println!("{} has {} billings", store.name, billings.len());
//! # Ok(())
//! # }
//! ```
//!
//! Bodies with documented bounds are validated locally; a violation is
//! returned as [`RestError::Validation`] and nothing is sent.

pub mod routes;


use chrono::NaiveDate;
use serde_json::json;

use crate::models::v1::{
    Charge, Coupon, CreateCharge, CreateCoupon, CreateCustomer, CreatePixQrCode, CreateWithdraw,
    Customer, Merchant, Mrr, PixQrCode, PixStatus, Revenue, Withdraw,
};
use crate::models::{Metadata, Store, Validate};
use crate::rest::{HttpClient, ReqwestClient, RequestDescriptor, Rest, RestError};
use crate::time::{Sleeper, TokioSleeper};

/// API version served by [`AbacatePay`].
pub const API_VERSION: u32 = 1;

/// Date format of the revenue range parameters.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Client for the AbacatePay v1 API.
#[derive(Debug)]
pub struct AbacatePay<H = ReqwestClient, S = TokioSleeper> {
    rest: Rest<H, S>,
}

impl AbacatePay<ReqwestClient, TokioSleeper> {
    /// Creates a client for the production API.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_rest(Rest::new(api_key))
    }
}

impl<H, S> AbacatePay<H, S> {
    /// Wraps a configured executor; its version is forced to 1.
    #[must_use]
    pub fn from_rest(rest: Rest<H, S>) -> Self {
        Self {
            rest: rest.with_version(API_VERSION),
        }
    }

    /// Low-level executor, for routes without a typed method.
    #[must_use]
    pub const fn rest(&self) -> &Rest<H, S> {
        &self.rest
    }

    /// Customer endpoints.
    #[must_use]
    pub const fn customers(&self) -> Customers<'_, H, S> {
        Customers { rest: &self.rest }
    }

    /// Billing endpoints.
    #[must_use]
    pub const fn billings(&self) -> Billings<'_, H, S> {
        Billings { rest: &self.rest }
    }

    /// PIX QR code endpoints.
    #[must_use]
    pub const fn pix(&self) -> Pix<'_, H, S> {
        Pix { rest: &self.rest }
    }

    /// Coupon endpoints.
    #[must_use]
    pub const fn coupons(&self) -> Coupons<'_, H, S> {
        Coupons { rest: &self.rest }
    }

    /// Withdraw endpoints.
    #[must_use]
    pub const fn withdraw(&self) -> Withdraws<'_, H, S> {
        Withdraws { rest: &self.rest }
    }

    /// Store endpoint.
    #[must_use]
    pub const fn store(&self) -> StoreApi<'_, H, S> {
        StoreApi { rest: &self.rest }
    }

    /// Public MRR endpoints.
    #[must_use]
    pub const fn mrr(&self) -> MrrApi<'_, H, S> {
        MrrApi { rest: &self.rest }
    }
}

/// `/customer/*`
#[derive(Debug)]
pub struct Customers<'a, H, S> {
    rest: &'a Rest<H, S>,
}

impl<H: HttpClient, S: Sleeper> Customers<'_, H, S> {
    /// Creates a customer.
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] if the call fails.
    pub async fn create(&self, body: &CreateCustomer) -> Result<Customer, RestError> {
        self.rest.post(routes::CUSTOMER_CREATE, body).await
    }

    /// Lists customers.
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] if the call fails.
    pub async fn list(&self) -> Result<Vec<Customer>, RestError> {
        self.rest.get(routes::CUSTOMER_LIST).await
    }
}

/// `/billing/*`
#[derive(Debug)]
pub struct Billings<'a, H, S> {
    rest: &'a Rest<H, S>,
}

impl<H: HttpClient, S: Sleeper> Billings<'_, H, S> {
    /// Creates a billing.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Validation`] for an invalid body (nothing is
    /// sent), or any other [`RestError`] if the call fails.
    pub async fn create(&self, body: &CreateCharge) -> Result<Charge, RestError> {
        body.validate()?;
        self.rest.post(routes::BILLING_CREATE, body).await
    }

    /// Lists billings.
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] if the call fails.
    pub async fn list(&self) -> Result<Vec<Charge>, RestError> {
        self.rest.get(routes::BILLING_LIST).await
    }
}

/// `/pixQrCode/*`
#[derive(Debug)]
pub struct Pix<'a, H, S> {
    rest: &'a Rest<H, S>,
}

impl<H: HttpClient, S: Sleeper> Pix<'_, H, S> {
    /// Creates a PIX QR code.
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] if the call fails.
    pub async fn create(&self, body: &CreatePixQrCode) -> Result<PixQrCode, RestError> {
        self.rest.post(routes::PIX_CREATE, body).await
    }

    /// Simulates the payment of a QR code (development mode only).
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] if the call fails.
    pub async fn simulate(
        &self,
        id: &str,
        metadata: Option<Metadata>,
    ) -> Result<PixQrCode, RestError> {
        let body = metadata.map_or_else(|| json!({}), |metadata| json!({ "metadata": metadata }));
        self.rest
            .request(&routes::pix_simulate(id).with_body(body))
            .await
    }

    /// Checks the status of a QR code.
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] if the call fails.
    pub async fn status(&self, id: &str) -> Result<PixStatus, RestError> {
        self.rest.request(&routes::pix_check(id)).await
    }
}

/// `/coupon/*`
#[derive(Debug)]
pub struct Coupons<'a, H, S> {
    rest: &'a Rest<H, S>,
}

impl<H: HttpClient, S: Sleeper> Coupons<'_, H, S> {
    /// Creates a coupon.
    ///
    /// The API expects the coupon under a `data` key.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Validation`] for an invalid body (nothing is
    /// sent), or any other [`RestError`] if the call fails.
    pub async fn create(&self, body: &CreateCoupon) -> Result<Coupon, RestError> {
        body.validate()?;
        let descriptor = RequestDescriptor::post(routes::COUPON_CREATE)
            .with_json(&json!({ "data": body }))?;
        self.rest.request(&descriptor).await
    }

    /// Lists coupons.
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] if the call fails.
    pub async fn list(&self) -> Result<Vec<Coupon>, RestError> {
        self.rest.get(routes::COUPON_LIST).await
    }
}

/// `/withdraw/*`
#[derive(Debug)]
pub struct Withdraws<'a, H, S> {
    rest: &'a Rest<H, S>,
}

impl<H: HttpClient, S: Sleeper> Withdraws<'_, H, S> {
    /// Requests a withdraw.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Validation`] for an invalid body (nothing is
    /// sent), or any other [`RestError`] if the call fails.
    pub async fn create(&self, body: &CreateWithdraw) -> Result<Withdraw, RestError> {
        body.validate()?;
        self.rest.post(routes::WITHDRAW_CREATE, body).await
    }

    /// Lists withdraws.
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] if the call fails.
    pub async fn list(&self) -> Result<Vec<Withdraw>, RestError> {
        self.rest.get(routes::WITHDRAW_LIST).await
    }

    /// Fetches a withdraw by the external id given at creation.
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] if the call fails.
    pub async fn get(&self, external_id: &str) -> Result<Withdraw, RestError> {
        self.rest.request(&routes::withdraw_get(external_id)).await
    }
}

/// `/store/get`
#[derive(Debug)]
pub struct StoreApi<'a, H, S> {
    rest: &'a Rest<H, S>,
}

impl<H: HttpClient, S: Sleeper> StoreApi<'_, H, S> {
    /// Fetches store details and balances.
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] if the call fails.
    pub async fn get(&self) -> Result<Store, RestError> {
        self.rest.get(routes::STORE_GET).await
    }
}

/// `/public-mrr/*`
#[derive(Debug)]
pub struct MrrApi<'a, H, S> {
    rest: &'a Rest<H, S>,
}

impl<H: HttpClient, S: Sleeper> MrrApi<'_, H, S> {
    /// Fetches the monthly recurring revenue.
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] if the call fails.
    pub async fn get(&self) -> Result<Mrr, RestError> {
        self.rest.get(routes::MRR_GET).await
    }

    /// Fetches revenue between two dates (inclusive).
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] if the call fails.
    pub async fn revenue(&self, start: NaiveDate, end: NaiveDate) -> Result<Revenue, RestError> {
        let start = start.format(DATE_FORMAT).to_string();
        let end = end.format(DATE_FORMAT).to_string();
        self.rest.request(&routes::mrr_revenue(&start, &end)).await
    }

    /// Fetches public merchant information.
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] if the call fails.
    pub async fn merchant(&self) -> Result<Merchant, RestError> {
        self.rest.get(routes::MRR_MERCHANT).await
    }
}

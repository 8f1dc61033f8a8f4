//! Routes of API v1, relative to the versioned base URL.

use crate::rest::RequestDescriptor;

pub const CUSTOMER_CREATE: &str = "/customer/create";
pub const CUSTOMER_LIST: &str = "/customer/list";

pub const BILLING_CREATE: &str = "/billing/create";
pub const BILLING_LIST: &str = "/billing/list";

pub const PIX_CREATE: &str = "/pixQrCode/create";
pub const PIX_SIMULATE: &str = "/pixQrCode/simulate-payment";
pub const PIX_CHECK: &str = "/pixQrCode/check";

pub const COUPON_CREATE: &str = "/coupon/create";
pub const COUPON_LIST: &str = "/coupon/list";

pub const WITHDRAW_CREATE: &str = "/withdraw/create";
pub const WITHDRAW_LIST: &str = "/withdraw/list";
pub const WITHDRAW_GET: &str = "/withdraw/get";

pub const STORE_GET: &str = "/store/get";

pub const MRR_GET: &str = "/public-mrr/mrr";
pub const MRR_REVENUE: &str = "/public-mrr/revenue";
pub const MRR_MERCHANT: &str = "/public-mrr/merchant-info";

/// `POST /pixQrCode/simulate-payment?id=<id>`
#[must_use]
pub fn pix_simulate(id: &str) -> RequestDescriptor {
    RequestDescriptor::post(PIX_SIMULATE).with_query("id", id)
}

/// `GET /pixQrCode/check?id=<id>`
#[must_use]
pub fn pix_check(id: &str) -> RequestDescriptor {
    RequestDescriptor::get(PIX_CHECK).with_query("id", id)
}

/// `GET /withdraw/get?externalId=<external_id>`
#[must_use]
pub fn withdraw_get(external_id: &str) -> RequestDescriptor {
    RequestDescriptor::get(WITHDRAW_GET).with_query("externalId", external_id)
}

/// `GET /public-mrr/revenue?startDate=<start>&endDate=<end>`
#[must_use]
pub fn mrr_revenue(start: &str, end: &str) -> RequestDescriptor {
    RequestDescriptor::get(MRR_REVENUE)
        .with_query("startDate", start)
        .with_query("endDate", end)
}

//! Shared payloads and requests for webhook tests.

use serde_json::{Value, json};

use super::{RawWebhookRequest, SECRET_QUERY_PARAM, SIGNATURE_HEADER, SignatureVerifier};

pub const SECRET: &str = "whsec_test_123";

pub fn v1_billing_paid_pix() -> Value {
    json!({
        "id": "log_v1_pix",
        "event": "billing.paid",
        "devMode": true,
        "data": {
            "payment": {
                "payment": {"amount": 4000, "fee": 80, "method": "PIX"},
                "pixQrCode": {"amount": 4000, "id": "pix_char_123", "kind": "PIX", "status": "PAID"}
            }
        }
    })
}

pub fn v1_billing_paid_billing() -> Value {
    json!({
        "id": "log_v1_bill",
        "event": "billing.paid",
        "devMode": false,
        "data": {
            "payment": {
                "payment": {"amount": 5000, "fee": 80, "method": "CARD"},
                "billing": {"amount": 5000, "id": "bill_123", "status": "PAID", "couponsUsed": ["SUMMER"]},
                "customer": {
                    "id": "cust_123",
                    "metadata": {
                        "name": "Daniel Lima",
                        "email": "daniel_lima@abacatepay.com",
                        "taxId": "123.456.789-01",
                        "cellphone": "(11) 4002-8922"
                    }
                },
                "frequency": "ONE_TIME",
                "kind": ["PIX", "CARD"],
                "paidAmount": 5000,
                "products": {"quantity": 1, "externalId": "prod_9384838", "id": "prod_abc"}
            }
        }
    })
}

pub fn v1_withdraw(event: &str, status: &str) -> Value {
    json!({
        "id": "log_v1_withdraw",
        "event": event,
        "devMode": false,
        "data": {
            "transaction": {
                "id": "tran_123",
                "status": status,
                "devMode": false,
                "receiptUrl": "https://abacatepay.com/receipt/tran_123",
                "amount": 10000,
                "platformFee": 80,
                "externalId": "tsx_123",
                "createdAt": "2025-03-01T12:00:00.000Z",
                "updatedAt": "2025-03-01T12:05:00.000Z",
                "kind": "WITHDRAW"
            }
        }
    })
}

pub fn v2_billing_paid_pix() -> Value {
    json!({
        "id": "log_v2_pix",
        "event": "billing.paid",
        "devMode": true,
        "data": {
            "payment": {
                "payment": {"amount": 4000, "fee": 80, "method": "PIX"},
                "pixQrCode": {"amount": 4000, "id": "pix_char_123", "kind": "PIX", "status": "PAID"}
            }
        }
    })
}

pub fn v2_billing_paid_checkout() -> Value {
    json!({
        "id": "log_v2_bill",
        "event": "billing.paid",
        "devMode": false,
        "data": {
            "payment": {
                "payment": {"amount": 4000, "fee": 80, "method": "CARD"},
                "billing": {
                    "amount": 4000,
                    "id": "bill_123",
                    "externalId": "order_123",
                    "status": "PAID",
                    "url": "https://app.abacatepay.com/pay/bill_123"
                }
            }
        }
    })
}

pub fn v2_payout(event: &str, status: &str) -> Value {
    json!({
        "id": "log_v2_payout",
        "event": event,
        "devMode": false,
        "data": {
            "transaction": {
                "id": "payout_123",
                "status": status,
                "devMode": false,
                "receiptUrl": null,
                "amount": 3000,
                "platformFee": 80,
                "externalId": "tsx_123",
                "createdAt": "2025-03-01T12:00:00Z",
                "updatedAt": "2025-03-01T12:05:00Z"
            }
        }
    })
}

pub fn signature(body: &[u8]) -> String {
    SignatureVerifier::new(SECRET).sign(body)
}

/// A request carrying the right secret and a valid signature.
pub fn signed_request(body: &[u8]) -> RawWebhookRequest {
    RawWebhookRequest::new(body.to_vec())
        .with_query(SECRET_QUERY_PARAM, SECRET)
        .with_header(SIGNATURE_HEADER, signature(body))
}

//! Host-framework adapters.
//!
//! The gateway needs three things from an inbound request: the raw body
//! bytes, one header and one query parameter. [`WebhookRequest`] is that
//! capability; any framework can implement it in a few lines.

use std::collections::HashMap;

use http::header::{CONTENT_TYPE, HeaderValue};
use http::{Request, Response, StatusCode};

use super::{WebhookEvent, WebhookGateway, WebhookRejection};

/// Capabilities the gateway needs from an inbound request.
pub trait WebhookRequest {
    /// Body exactly as received.
    fn raw_body(&self) -> &[u8];

    /// Value of header `name` (case-insensitive), if present and valid UTF-8.
    fn header(&self, name: &str) -> Option<&str>;

    /// Decoded value of query parameter `name`, if present.
    fn query_param(&self, name: &str) -> Option<String>;
}

impl<B: AsRef<[u8]>> WebhookRequest for Request<B> {
    fn raw_body(&self) -> &[u8] {
        self.body().as_ref()
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers().get(name)?.to_str().ok()
    }

    fn query_param(&self, name: &str) -> Option<String> {
        let query = self.uri().query()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

/// Framework-independent request, for hosts that hand over parts.
#[derive(Debug, Clone, Default)]
pub struct RawWebhookRequest {
    body: Vec<u8>,
    headers: HashMap<String, String>,
    query: HashMap<String, String>,
}

impl RawWebhookRequest {
    /// Creates a request with the given raw body.
    #[must_use]
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            ..Self::default()
        }
    }

    /// Adds a header (names are case-insensitive).
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Adds a decoded query parameter.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }
}

impl WebhookRequest for RawWebhookRequest {
    fn raw_body(&self) -> &[u8] {
        &self.body
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    fn query_param(&self, name: &str) -> Option<String> {
        self.query.get(name).cloned()
    }
}

/// Builds the HTTP response for a gateway outcome.
///
/// Success is `204 No Content` with an empty body. Rejections carry their
/// status and `{"error": "<public message>"}`.
#[must_use]
pub fn into_http_response(outcome: &Result<(), WebhookRejection>) -> Response<Vec<u8>> {
    let (status, body) = match outcome {
        Ok(()) => (StatusCode::NO_CONTENT, Vec::new()),
        Err(rejection) => (
            rejection.status(),
            serde_json::json!({ "error": rejection.public_message() })
                .to_string()
                .into_bytes(),
        ),
    };

    let mut response = Response::new(body);
    *response.status_mut() = status;
    if outcome.is_err() {
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
    response
}

/// Runs an [`http::Request`] through the gateway and builds the response.
///
/// # Example
///
/// ```
/// use abacatepay::webhook::{HandlerRegistry, WebhookConfig, WebhookGateway, handle_http, v1};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let gateway = WebhookGateway::new(
///     WebhookConfig::new("whsec_123"),
///     HandlerRegistry::<v1::Event>::default(),
/// )?;
/// let request = http::Request::post("/webhooks/abacatepay?webhookSecret=whsec_123")
///     .body(b"{}".to_vec())?;
///
/// let response = handle_http(&gateway, &request).await;
/// assert_eq!(response.status(), http::StatusCode::BAD_REQUEST); // no signature
/// # Ok(())
/// # }
/// ```
pub async fn handle_http<E, B>(gateway: &WebhookGateway<E>, request: &Request<B>) -> Response<Vec<u8>>
where
    E: WebhookEvent,
    B: AsRef<[u8]>,
{
    let outcome = gateway.handle(request).await;
    into_http_response(&outcome)
}

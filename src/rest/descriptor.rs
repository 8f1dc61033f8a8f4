//! Description of one logical API call.

use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;

use super::RestError;

/// What to call: method, route, query, body and extra headers.
///
/// The descriptor is built once and borrowed by every attempt of the call,
/// so all retries send the same request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    method: Method,
    route: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    headers: HeaderMap,
}

impl RequestDescriptor {
    /// Creates a descriptor for `method` on `route` (e.g. `/billing/list`).
    #[must_use]
    pub fn new(method: Method, route: impl Into<String>) -> Self {
        Self {
            method,
            route: route.into(),
            query: Vec::new(),
            body: None,
            headers: HeaderMap::new(),
        }
    }

    /// Creates a GET descriptor.
    #[must_use]
    pub fn get(route: impl Into<String>) -> Self {
        Self::new(Method::GET, route)
    }

    /// Creates a POST descriptor.
    #[must_use]
    pub fn post(route: impl Into<String>) -> Self {
        Self::new(Method::POST, route)
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serializes `body` into the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Serialize`] if `body` cannot be represented as JSON.
    pub fn with_json<B: Serialize + ?Sized>(self, body: &B) -> Result<Self, RestError> {
        let value = serde_json::to_value(body).map_err(|source| RestError::Serialize {
            route: self.route.clone(),
            source,
        })?;
        Ok(self.with_body(value))
    }

    /// Adds an extra header (sent on every attempt).
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Route relative to the versioned base URL.
    #[must_use]
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Query parameters in insertion order.
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// JSON body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Extra headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

//! The request executor: one logical API call with classification and retries.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::time::{Sleeper, TokioSleeper};

use super::classify::{Classification, classify};
use super::{
    HttpClient, HttpRequest, HttpResponse, ReqwestClient, RequestDescriptor, RestError,
    RetryPolicy,
};

/// Public API host.
pub const DEFAULT_BASE_URL: &str = "https://api.abacatepay.com";

/// API version used when none is configured.
pub const DEFAULT_API_VERSION: u32 = 1;

/// Low-level REST client for the AbacatePay API.
///
/// Every call goes through [`Rest::execute_with`]: attempt 0 is sent right
/// away, transient failures are retried with exponential backoff and jitter
/// while attempts remain, and the last observed outcome is returned.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation (defaults to [`ReqwestClient`])
/// - `S`: The sleeper used for backoff waits (defaults to [`TokioSleeper`])
///
/// # Example
///
/// ```no_run
/// use abacatepay::rest::Rest;
///
/// # async fn example() -> Result<(), abacatepay::rest::RestError> {
/// let rest = Rest::new("abc_dev_123");
/// let store: serde_json::Value = rest.get("/store/get").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Rest<H = ReqwestClient, S = TokioSleeper> {
    client: H,
    sleeper: S,
    api_key: String,
    base_url: url::Url,
    version: u32,
    retry_policy: RetryPolicy,
}

impl Rest<ReqwestClient, TokioSleeper> {
    /// Creates a client for the production API with default settings.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(ReqwestClient::new(), api_key)
    }
}

impl<H> Rest<H, TokioSleeper> {
    /// Creates a client on top of a custom [`HttpClient`].
    #[must_use]
    pub fn with_client(client: H, api_key: impl Into<String>) -> Self {
        let base_url = url::Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid URL");

        Self {
            client,
            sleeper: TokioSleeper,
            api_key: api_key.into(),
            base_url,
            version: DEFAULT_API_VERSION,
            retry_policy: RetryPolicy::default(),
        }
    }
}

impl<H, S> Rest<H, S> {
    /// Sets a custom sleeper for backoff waits.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> Rest<H, S2> {
        Rest {
            client: self.client,
            sleeper,
            api_key: self.api_key,
            base_url: self.base_url,
            version: self.version,
            retry_policy: self.retry_policy,
        }
    }

    /// Sets the API host (the version path is appended per request).
    #[must_use]
    pub fn with_base_url(mut self, base_url: url::Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Sets the API version embedded in the base path (`/v{version}`).
    #[must_use]
    pub const fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Sets the process-wide default retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Returns the configured API host.
    #[must_use]
    pub const fn base_url(&self) -> &url::Url {
        &self.base_url
    }

    /// Returns the configured API version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the default retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Resolves the absolute URL for a descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Transport`] if the URL cannot be built.
    pub fn url_for(&self, descriptor: &RequestDescriptor) -> Result<url::Url, RestError> {
        let route = descriptor.route();
        let raw = format!(
            "{}/v{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            self.version,
            route.trim_start_matches('/')
        );

        let mut url = url::Url::parse(&raw).map_err(|e| RestError::Transport {
            route: route.to_string(),
            message: format!("Invalid URL '{raw}': {e}"),
        })?;

        if !descriptor.query().is_empty() {
            url.query_pairs_mut().extend_pairs(descriptor.query());
        }

        Ok(url)
    }

    /// Builds the wire request shared by every attempt of a call.
    fn build_request(&self, descriptor: &RequestDescriptor) -> Result<HttpRequest, RestError> {
        let url = self.url_for(descriptor)?;
        let mut request = HttpRequest::new(descriptor.method().clone(), url)
            .with_bearer(&self.api_key)
            .accepting_json();

        for (name, value) in descriptor.headers() {
            request.headers.append(name, value.clone());
        }

        if let Some(body) = descriptor.body() {
            request = request.with_json_body(body.to_string().into_bytes());
        }

        Ok(request)
    }
}

impl<H: HttpClient, S: Sleeper> Rest<H, S> {
    /// Executes a call with the default retry policy.
    ///
    /// # Errors
    ///
    /// See [`Rest::execute_with`].
    pub async fn execute(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<serde_json::Value, RestError> {
        self.execute_with(descriptor, &self.retry_policy).await
    }

    /// Executes a call with an explicit retry policy.
    ///
    /// Returns the `data` member of the response envelope (or the whole
    /// body when the response is not enveloped).
    ///
    /// # Errors
    ///
    /// - [`RestError::Api`] for error statuses or a non-null `error` envelope
    /// - [`RestError::Transport`] when no response could be obtained
    /// - [`RestError::Decode`] when a success body is not JSON
    ///
    /// When retries run out, the error of the last attempt is returned.
    pub async fn execute_with(
        &self,
        descriptor: &RequestDescriptor,
        policy: &RetryPolicy,
    ) -> Result<serde_json::Value, RestError> {
        let request = self.build_request(descriptor)?;
        let route = descriptor.route();
        let mut attempt: u32 = 0;

        loop {
            tracing::debug!(
                method = %descriptor.method(),
                route,
                attempt,
                "Sending API request"
            );

            let result = self.client.request(request.clone()).await;

            match classify(route, result, policy) {
                Classification::Success(response) => {
                    return unwrap_envelope(route, &response);
                }
                Classification::Fatal(error) => {
                    tracing::warn!(route, attempt, "API request failed: {error}");
                    return Err(error);
                }
                Classification::Retryable(failure) => {
                    let retry_allowed = policy.should_retry(attempt)
                        && policy.permits_retry(descriptor.method(), failure.status);

                    if !retry_allowed {
                        tracing::warn!(
                            route,
                            attempts = attempt + 1,
                            "API request failed: {}",
                            failure.error
                        );
                        return Err(failure.error);
                    }

                    let delay = policy.delay_for_retry(attempt);
                    tracing::warn!(
                        route,
                        attempt,
                        status = failure.status.map(|s| s.as_u16()),
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "Transient API failure, retrying: {}",
                        failure.error
                    );
                    self.sleeper.sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Executes a call and decodes the payload into `T`.
    ///
    /// # Errors
    ///
    /// Everything [`Rest::execute`] returns, plus [`RestError::Decode`] when
    /// the payload does not match `T`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<T, RestError> {
        let value = self.execute(descriptor).await?;
        serde_json::from_value(value).map_err(|e| RestError::Decode {
            route: descriptor.route().to_string(),
            message: e.to_string(),
        })
    }

    /// GET `route` and decode the payload.
    ///
    /// # Errors
    ///
    /// See [`Rest::request`].
    pub async fn get<T: DeserializeOwned>(&self, route: &str) -> Result<T, RestError> {
        self.request(&RequestDescriptor::get(route)).await
    }

    /// POST `body` as JSON to `route` and decode the payload.
    ///
    /// # Errors
    ///
    /// See [`Rest::request`]; also [`RestError::Serialize`] if `body` cannot
    /// be encoded.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        route: &str,
        body: &B,
    ) -> Result<T, RestError> {
        let descriptor = RequestDescriptor::post(route).with_json(body)?;
        self.request(&descriptor).await
    }
}

/// Extracts the payload from the `{ "data": ..., "error": ... }` envelope.
fn unwrap_envelope(route: &str, response: &HttpResponse) -> Result<serde_json::Value, RestError> {
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::Value::Null);
    }

    let value: serde_json::Value =
        serde_json::from_slice(&response.body).map_err(|e| RestError::Decode {
            route: route.to_string(),
            message: e.to_string(),
        })?;

    let serde_json::Value::Object(mut envelope) = value else {
        return Ok(value);
    };

    if !envelope.contains_key("data") && !envelope.contains_key("error") {
        return Ok(serde_json::Value::Object(envelope));
    }

    match envelope.remove("error") {
        None | Some(serde_json::Value::Null) => {}
        Some(serde_json::Value::String(message)) => {
            return Err(RestError::api(route, response.status, message));
        }
        Some(other) => return Err(RestError::api(route, response.status, other.to_string())),
    }

    Ok(envelope.remove("data").unwrap_or(serde_json::Value::Null))
}

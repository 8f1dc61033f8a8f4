//! Production HTTP client implementation using reqwest.

use std::time::Duration;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// `User-Agent` sent with every API request.
pub const USER_AGENT: &str = concat!("abacatepay-rust/", env!("CARGO_PKG_VERSION"));

/// Production HTTP client using reqwest.
///
/// A thin wrapper around `reqwest::Client` implementing [`HttpClient`].
/// The per-attempt timeout is enforced here; the retry loop above it has no
/// wall-clock deadline of its own.
///
/// # Example
///
/// ```no_run
/// use abacatepay::rest::{HttpClient, HttpRequest, ReqwestClient};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::new();
/// let url = Url::parse("https://api.abacatepay.com/v1/store/get")?;
/// let response = client.request(HttpRequest::new(http::Method::GET, url)).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Default per-attempt timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a client with the default timeout and user agent.
    ///
    /// If the TLS backend rejects those settings, reqwest's plain default
    /// client is used and the lost settings are logged. Use
    /// [`Self::with_timeout`] to get the error instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(Self::DEFAULT_TIMEOUT).unwrap_or_else(|e| {
            tracing::warn!(
                timeout_secs = Self::DEFAULT_TIMEOUT.as_secs(),
                user_agent = USER_AGENT,
                "HTTP client settings not applied, using reqwest defaults: {e}"
            );
            Self::from_client(reqwest::Client::default())
        })
    }

    /// Creates a client with a custom per-attempt timeout.
    ///
    /// # Errors
    ///
    /// Returns the reqwest builder error if the client cannot be built with
    /// the timeout and user agent.
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        build_client(timeout, USER_AGENT).map(Self::from_client)
    }

    /// Creates a client from an existing reqwest client.
    ///
    /// Useful when you need custom configuration (proxies, TLS, etc.).
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { inner: client }
    }
}

fn build_client(timeout: Duration, user_agent: &str) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = self.inner.request(req.method, req.url.as_str());

        for (name, value) in &req.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout
            } else if e.is_builder() {
                HttpError::InvalidUrl(e.to_string())
            } else {
                HttpError::Connection(Box::new(e))
            }
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    HttpError::Timeout
                } else {
                    HttpError::Connection(Box::new(e))
                }
            })?
            .to_vec();

        Ok(HttpResponse::new(status, headers, body))
    }
}

//! Classification of a single HTTP exchange.
//!
//! Pure mapping from "what happened on the wire" to "what the retry loop
//! should do next". No I/O and no logging happen here.

use super::{HttpError, HttpResponse, RestError, RetryPolicy};

/// A failure the retry loop may try again.
#[derive(Debug)]
pub struct RetryableFailure {
    /// Status of the failed response, `None` when no response was received.
    pub status: Option<http::StatusCode>,
    /// Error surfaced to the caller if no further attempt is made.
    pub error: RestError,
}

/// Outcome of one attempt.
#[derive(Debug)]
pub enum Classification {
    /// 2xx response; the payload still has to be unwrapped.
    Success(HttpResponse),
    /// Transient failure (network error or status in the retryable set).
    Retryable(RetryableFailure),
    /// Failure that no retry can fix.
    Fatal(RestError),
}

impl Classification {
    /// Returns true for [`Classification::Retryable`].
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Retryable(_))
    }
}

/// Classifies the result of sending a request to `route`.
#[must_use]
pub fn classify(
    route: &str,
    result: Result<HttpResponse, HttpError>,
    policy: &RetryPolicy,
) -> Classification {
    let response = match result {
        Ok(response) => response,
        Err(error) if error.is_transient() => {
            return Classification::Retryable(RetryableFailure {
                status: None,
                error: RestError::transport(route, &error),
            });
        }
        Err(error) => return Classification::Fatal(RestError::transport(route, &error)),
    };

    if policy.is_retryable_status(response.status) {
        return Classification::Retryable(RetryableFailure {
            status: Some(response.status),
            error: api_error(route, &response),
        });
    }

    if response.is_success() {
        return Classification::Success(response);
    }

    Classification::Fatal(api_error(route, &response))
}

/// Builds an `Api` error from a non-success response.
fn api_error(route: &str, response: &HttpResponse) -> RestError {
    let message = error_message(&response.body).unwrap_or_else(|| status_message(response.status));
    RestError::api(route, response.status, message)
}

/// Extracts the message from a structured error body.
///
/// The API reports errors as `{"error": "..."}`; a `message` field is
/// accepted as well.
#[must_use]
pub fn error_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    let object = value.as_object()?;

    ["error", "message"]
        .iter()
        .filter_map(|key| object.get(*key))
        .find_map(|field| match field {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Null | serde_json::Value::String(_) => None,
            other => Some(other.to_string()),
        })
}

/// Generic message for a status without a usable body.
fn status_message(status: http::StatusCode) -> String {
    format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown Status")
    )
}

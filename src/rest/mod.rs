//! Outbound side of the SDK: the resilient request pipeline.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`]) and describing API calls ([`RequestDescriptor`])
//! - Abstracting HTTP clients ([`HttpClient`]) with a production implementation ([`ReqwestClient`])
//! - Classifying each attempt ([`classify`])
//! - Backoff configuration ([`RetryPolicy`])
//! - Executing calls with retries ([`Rest`])

mod classify;
mod client;
mod descriptor;
mod error;
mod executor;
mod http;
mod retry;

#[cfg(test)]
mod classify_tests;
#[cfg(test)]
mod client_tests;

pub use self::http::{HttpClient, HttpRequest, HttpResponse};
pub use classify::{Classification, RetryableFailure, classify, error_message};
pub use client::{ReqwestClient, USER_AGENT};
pub use descriptor::RequestDescriptor;
pub use error::{HttpError, RestError};
pub use executor::{DEFAULT_API_VERSION, DEFAULT_BASE_URL, Rest};
pub use retry::RetryPolicy;

//! AbacatePay client SDK.
//!
//! Two independent halves:
//!
//! - [`rest`]: outbound calls with error classification, exponential backoff
//!   and per-call retry policies, wrapped by the typed [`api::AbacatePay`]
//!   client.
//! - [`webhook`]: inbound notifications checked against the shared secret
//!   and HMAC signature, validated against the versioned event union, then
//!   routed to registered handlers.
//!
//! [`config`] backs the `abacatepay` command-line tool.

pub mod api;
pub mod config;
pub mod models;
pub mod rest;
pub mod time;
pub mod webhook;

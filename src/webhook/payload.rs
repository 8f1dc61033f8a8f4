//! Parsing of raw webhook bodies into a versioned event union.

use serde::de::DeserializeOwned;

/// Outcome of parsing a webhook body.
///
/// Failures are values, not errors: the gateway maps each one to a
/// rejection without ever panicking on attacker-controlled input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseResult<E> {
    /// The body is a valid member of the union.
    Parsed(E),
    /// The body is not JSON.
    InvalidJson(String),
    /// The body is JSON but violates the schema (including an unknown `event`).
    InvalidPayload(String),
}

impl<E> ParseResult<E> {
    /// Returns true for [`ParseResult::Parsed`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }

    /// Returns the event, discarding failure details.
    #[must_use]
    pub fn into_option(self) -> Option<E> {
        match self {
            Self::Parsed(event) => Some(event),
            Self::InvalidJson(_) | Self::InvalidPayload(_) => None,
        }
    }
}

/// Parses `raw` as a member of the event union `E`.
///
/// # Example
///
/// ```
/// use abacatepay::webhook::{parse, v2};
///
/// let outcome = parse::<v2::Event>(b"{not json");
/// assert!(!outcome.is_success());
/// ```
#[must_use]
pub fn parse<E: DeserializeOwned>(raw: &[u8]) -> ParseResult<E> {
    let value: serde_json::Value = match serde_json::from_slice(raw) {
        Ok(value) => value,
        Err(e) => return ParseResult::InvalidJson(e.to_string()),
    };

    match serde_json::from_value(value) {
        Ok(event) => ParseResult::Parsed(event),
        Err(e) => ParseResult::InvalidPayload(e.to_string()),
    }
}

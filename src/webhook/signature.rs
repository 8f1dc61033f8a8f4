//! HMAC-SHA256 signature verification over the raw webhook body.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the signature of the raw body.
pub const SIGNATURE_HEADER: &str = "x-webhook-signature";

/// Length of a hex-encoded SHA-256 digest.
const HEX_DIGEST_LEN: usize = 64;

/// Checks that a body was signed with the shared signing key.
///
/// The signature is the HMAC-SHA256 of the exact bytes received, keyed with
/// the signing key. Senders encode it as standard base64; a 64-character
/// lowercase hex digest, optionally prefixed with `sha256=`, is accepted as well.
///
/// # Example
///
/// ```
/// use abacatepay::webhook::SignatureVerifier;
///
/// let verifier = SignatureVerifier::new("whsec_123");
/// let body = br#"{"id":"log_1"}"#;
/// let signature = verifier.sign(body);
///
/// assert!(verifier.verify(body, Some(&signature)));
/// assert!(!verifier.verify(b"tampered", Some(&signature)));
/// ```
#[derive(Clone)]
pub struct SignatureVerifier {
    key: Vec<u8>,
}

impl SignatureVerifier {
    /// Creates a verifier for `key`.
    #[must_use]
    pub fn new(key: impl AsRef<[u8]>) -> Self {
        Self {
            key: key.as_ref().to_vec(),
        }
    }

    /// Returns true if `signature` is a valid signature of `raw_body`.
    ///
    /// A missing or undecodable signature, or an empty key, never verifies.
    #[must_use]
    pub fn verify(&self, raw_body: &[u8], signature: Option<&str>) -> bool {
        let Some(signature) = signature else {
            return false;
        };
        let Some(provided) = decode_signature(signature.trim()) else {
            return false;
        };
        let Some(mac) = self.mac(raw_body) else {
            return false;
        };

        mac.verify_slice(&provided).is_ok()
    }

    /// Computes the base64 signature of `raw_body`.
    ///
    /// Returns an empty string when the key is empty.
    #[must_use]
    pub fn sign(&self, raw_body: &[u8]) -> String {
        self.mac(raw_body)
            .map(|mac| STANDARD.encode(mac.finalize().into_bytes()))
            .unwrap_or_default()
    }

    /// Computes the hex signature of `raw_body`.
    #[must_use]
    pub fn sign_hex(&self, raw_body: &[u8]) -> String {
        self.mac(raw_body)
            .map(|mac| hex::encode(mac.finalize().into_bytes()))
            .unwrap_or_default()
    }

    fn mac(&self, raw_body: &[u8]) -> Option<HmacSha256> {
        if self.key.is_empty() {
            return None;
        }
        let mut mac = HmacSha256::new_from_slice(&self.key).ok()?;
        mac.update(raw_body);
        Some(mac)
    }
}

impl fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("key", &"<redacted>")
            .finish()
    }
}

/// Decodes a header value into raw digest bytes.
fn decode_signature(signature: &str) -> Option<Vec<u8>> {
    if signature.is_empty() {
        return None;
    }

    let unprefixed = signature.strip_prefix("sha256=").unwrap_or(signature);
    if unprefixed.len() == HEX_DIGEST_LEN && unprefixed.bytes().all(is_lower_hex) {
        return hex::decode(unprefixed).ok();
    }

    STANDARD.decode(signature).ok()
}

/// Only the lowercase form is accepted, so every bit of the digest text is significant.
const fn is_lower_hex(b: u8) -> bool {
    b.is_ascii_digit() || matches!(b, b'a'..=b'f')
}

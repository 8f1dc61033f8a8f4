//! Request-handling entry point composing the webhook stages.

use std::marker::PhantomData;
use std::sync::Arc;

use subtle::ConstantTimeEq;

use super::payload::{ParseResult, parse};
use super::{
    HandlerRegistry, SIGNATURE_HEADER, SignatureVerifier, WebhookConfigError, WebhookEvent,
    WebhookRejection, WebhookRequest,
};

/// Query parameter carrying the shared secret.
pub const SECRET_QUERY_PARAM: &str = "webhookSecret";

/// Settings of a [`WebhookGateway`].
#[derive(Clone, Default)]
pub struct WebhookConfig {
    /// Shared secret expected in the `webhookSecret` query parameter.
    pub secret: String,
    /// HMAC key for signatures; the secret is used when `None`.
    pub signing_key: Option<String>,
}

impl WebhookConfig {
    /// Creates a config where the secret also keys the signature.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            signing_key: None,
        }
    }

    /// Sets a dedicated signing key.
    #[must_use]
    pub fn with_signing_key(mut self, key: impl Into<String>) -> Self {
        self.signing_key = Some(key.into());
        self
    }
}

impl std::fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("secret", &"<redacted>")
            .field("signing_key", &self.signing_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Authorizes, verifies, parses and dispatches webhook notifications.
///
/// Holds only immutable state, so one gateway can serve concurrent requests
/// through `&self`.
///
/// # Example
///
/// ```
/// use abacatepay::webhook::{
///     HandlerRegistry, RawWebhookRequest, WebhookConfig, WebhookGateway, v2,
/// };
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let gateway = WebhookGateway::new(
///     WebhookConfig::new("whsec_123"),
///     HandlerRegistry::<v2::Event>::default(),
/// )?;
///
/// let request = RawWebhookRequest::new(b"{}".to_vec()).with_query("webhookSecret", "wrong");
/// let rejection = gateway.handle(&request).await.unwrap_err();
/// assert_eq!(rejection.status(), http::StatusCode::UNAUTHORIZED);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct WebhookGateway<E: WebhookEvent> {
    secret: String,
    verifier: SignatureVerifier,
    registry: Arc<HandlerRegistry<E>>,
    _event: PhantomData<fn() -> E>,
}

impl<E: WebhookEvent> WebhookGateway<E> {
    /// Creates a gateway.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookConfigError::MissingSecret`] when the secret is empty.
    pub fn new(
        config: WebhookConfig,
        registry: HandlerRegistry<E>,
    ) -> Result<Self, WebhookConfigError> {
        Self::with_shared_registry(config, Arc::new(registry))
    }

    /// Creates a gateway over a registry shared with other gateways.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookConfigError::MissingSecret`] when the secret is empty.
    pub fn with_shared_registry(
        config: WebhookConfig,
        registry: Arc<HandlerRegistry<E>>,
    ) -> Result<Self, WebhookConfigError> {
        if config.secret.is_empty() {
            return Err(WebhookConfigError::MissingSecret);
        }

        let key = config
            .signing_key
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| config.secret.clone());

        Ok(Self {
            verifier: SignatureVerifier::new(key),
            secret: config.secret,
            registry,
            _event: PhantomData,
        })
    }

    /// Returns the signature verifier in use.
    #[must_use]
    pub const fn verifier(&self) -> &SignatureVerifier {
        &self.verifier
    }

    /// Handles one notification.
    ///
    /// Checks run in order and stop at the first failure: secret,
    /// signature presence, signature validity, JSON, schema. The body is
    /// never parsed unless the signature verifies. On success the event has
    /// been processed by exactly one handler (or acknowledged unhandled).
    ///
    /// # Errors
    ///
    /// Returns the [`WebhookRejection`] describing the first failed check,
    /// or [`WebhookRejection::Handler`] if the handler failed.
    pub async fn handle<R>(&self, request: &R) -> Result<(), WebhookRejection>
    where
        R: WebhookRequest + ?Sized,
    {
        let provided = request.query_param(SECRET_QUERY_PARAM);
        if !secrets_match(provided.as_deref(), &self.secret) {
            tracing::warn!("Rejected webhook: secret mismatch");
            return Err(WebhookRejection::Unauthorized);
        }

        let Some(signature) = request
            .header(SIGNATURE_HEADER)
            .filter(|value| !value.is_empty())
        else {
            tracing::warn!("Rejected webhook: missing signature");
            return Err(WebhookRejection::MissingSignature);
        };

        let raw = request.raw_body();
        if !self.verifier.verify(raw, Some(signature)) {
            tracing::warn!(bytes = raw.len(), "Rejected webhook: invalid signature");
            return Err(WebhookRejection::InvalidSignature);
        }

        let event = match parse::<E>(raw) {
            ParseResult::Parsed(event) => event,
            ParseResult::InvalidJson(detail) => {
                tracing::warn!("Rejected webhook: invalid JSON: {detail}");
                return Err(WebhookRejection::InvalidJson(detail));
            }
            ParseResult::InvalidPayload(detail) => {
                tracing::warn!("Rejected webhook: invalid payload: {detail}");
                return Err(WebhookRejection::InvalidPayload(detail));
            }
        };

        let event_type = event.event_type();
        let id = event.id().to_string();
        tracing::info!(event = %event_type, id = %id, dev_mode = event.dev_mode(), "Webhook received");

        match self.registry.dispatch(event).await {
            Ok(dispatch) => {
                tracing::debug!(event = %event_type, id = %id, ?dispatch, "Webhook dispatched");
                Ok(())
            }
            Err(e) => {
                tracing::error!(event = %event_type, id = %id, "Webhook handler failed: {e}");
                Err(WebhookRejection::Handler(e))
            }
        }
    }
}

/// Compares the provided secret with the expected one in constant time.
///
/// Both values are padded to the longer length with distinct fill bytes, so
/// neither the position of the first difference nor a length mismatch
/// short-circuits the comparison.
fn secrets_match(provided: Option<&str>, expected: &str) -> bool {
    let Some(provided) = provided else {
        return false;
    };
    let len = provided.len().max(expected.len());

    let mut provided_padded = vec![0u8; len];
    let mut expected_padded = vec![0xFFu8; len];
    provided_padded[..provided.len()].copy_from_slice(provided.as_bytes());
    expected_padded[..expected.len()].copy_from_slice(expected.as_bytes());

    let lengths_equal = provided.len().ct_eq(&expected.len());
    let contents_equal = provided_padded.ct_eq(&expected_padded);
    (lengths_equal & contents_equal).into()
}

//! Routing of parsed events to caller-supplied handlers.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use super::WebhookEvent;

/// Error returned by an event handler.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Handles one kind of webhook event.
///
/// Implement this for stateful handlers, or wrap an async closure with
/// [`handler_fn`].
#[async_trait]
pub trait EventHandler<E>: Send + Sync {
    /// Processes the event. Errors are reported back to the gateway.
    async fn handle(&self, event: E) -> Result<(), HandlerError>;
}

/// Adapter turning an async closure into an [`EventHandler`].
pub struct FnHandler<F>(F);

#[async_trait]
impl<E, F, Fut> EventHandler<E> for FnHandler<F>
where
    E: Send + 'static,
    F: Fn(E) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
    async fn handle(&self, event: E) -> Result<(), HandlerError> {
        (self.0)(event).await
    }
}

/// Wraps an async closure as an event handler.
///
/// # Example
///
/// ```
/// use abacatepay::webhook::{HandlerRegistry, handler_fn, v2};
///
/// let registry = HandlerRegistry::<v2::Event>::builder()
///     .on(
///         v2::EventType::BillingPaid,
///         handler_fn(|event: v2::Event| async move {
///             println!("paid: {}", abacatepay::webhook::WebhookEvent::id(&event));
///             Ok(())
///         }),
///     )
///     .build();
///
/// assert!(registry.has_handler(v2::EventType::BillingPaid));
/// ```
pub const fn handler_fn<F>(f: F) -> FnHandler<F> {
    FnHandler(f)
}

/// Which handler processed an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The handler registered for the event type.
    Specific,
    /// The fallback handler.
    Fallback,
    /// No handler was registered; the event is acknowledged anyway.
    Unhandled,
}

/// Immutable mapping from event type to handler, plus an optional fallback.
pub struct HandlerRegistry<E: WebhookEvent> {
    handlers: HashMap<E::EventType, Arc<dyn EventHandler<E>>>,
    fallback: Option<Arc<dyn EventHandler<E>>>,
}

impl<E: WebhookEvent> HandlerRegistry<E> {
    /// Starts building a registry.
    #[must_use]
    pub fn builder() -> HandlerRegistryBuilder<E> {
        HandlerRegistryBuilder {
            handlers: HashMap::new(),
            fallback: None,
        }
    }

    /// Returns true if a specific handler exists for `event_type`.
    #[must_use]
    pub fn has_handler(&self, event_type: E::EventType) -> bool {
        self.handlers.contains_key(&event_type)
    }

    /// Returns true if a fallback handler is registered.
    #[must_use]
    pub const fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Routes `event` to exactly one handler and waits for it.
    ///
    /// The specific handler wins over the fallback. Without either, the
    /// event is acknowledged as [`Dispatch::Unhandled`].
    ///
    /// # Errors
    ///
    /// Returns the handler's error unchanged.
    pub async fn dispatch(&self, event: E) -> Result<Dispatch, HandlerError> {
        let event_type = event.event_type();

        if let Some(handler) = self.handlers.get(&event_type) {
            handler.handle(event).await?;
            return Ok(Dispatch::Specific);
        }

        if let Some(fallback) = &self.fallback {
            fallback.handle(event).await?;
            return Ok(Dispatch::Fallback);
        }

        tracing::debug!(event = %event_type, "No handler registered, acknowledging event");
        Ok(Dispatch::Unhandled)
    }
}

impl<E: WebhookEvent> Default for HandlerRegistry<E> {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl<E: WebhookEvent> fmt::Debug for HandlerRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

/// Builder for [`HandlerRegistry`].
pub struct HandlerRegistryBuilder<E: WebhookEvent> {
    handlers: HashMap<E::EventType, Arc<dyn EventHandler<E>>>,
    fallback: Option<Arc<dyn EventHandler<E>>>,
}

impl<E: WebhookEvent> HandlerRegistryBuilder<E> {
    /// Registers the handler for `event_type`, replacing any previous one.
    #[must_use]
    pub fn on(mut self, event_type: E::EventType, handler: impl EventHandler<E> + 'static) -> Self {
        self.handlers.insert(event_type, Arc::new(handler));
        self
    }

    /// Registers the handler used for event types without a specific one.
    #[must_use]
    pub fn fallback(mut self, handler: impl EventHandler<E> + 'static) -> Self {
        self.fallback = Some(Arc::new(handler));
        self
    }

    /// Freezes the registry.
    #[must_use]
    pub fn build(self) -> HandlerRegistry<E> {
        HandlerRegistry {
            handlers: self.handlers,
            fallback: self.fallback,
        }
    }
}

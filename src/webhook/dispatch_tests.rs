//! Tests for routing events to handlers.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::test_fixtures::*;
use super::{Dispatch, EventHandler, HandlerError, HandlerRegistry, WebhookEvent, handler_fn, v2};

/// Handler that counts invocations and remembers event ids.
#[derive(Default)]
struct Recorder {
    calls: AtomicUsize,
    ids: std::sync::Mutex<Vec<String>>,
}

#[async_trait]
impl EventHandler<v2::Event> for Arc<Recorder> {
    async fn handle(&self, event: v2::Event) -> Result<(), HandlerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.ids.lock().unwrap().push(event.id().to_string());
        Ok(())
    }
}

impl Recorder {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn payout_done() -> v2::Event {
    serde_json::from_value(v2_payout("payout.done", "COMPLETE")).unwrap()
}

fn billing_paid() -> v2::Event {
    serde_json::from_value(v2_billing_paid_pix()).unwrap()
}

mod routing {
    use super::*;

    #[tokio::test]
    async fn specific_handler_wins_over_fallback() {
        let specific = Arc::new(Recorder::default());
        let fallback = Arc::new(Recorder::default());
        let registry = HandlerRegistry::<v2::Event>::builder()
            .on(v2::EventType::PayoutDone, specific.clone())
            .fallback(fallback.clone())
            .build();

        let dispatch = registry.dispatch(payout_done()).await.unwrap();

        assert_eq!(dispatch, Dispatch::Specific);
        assert_eq!(specific.calls(), 1);
        assert_eq!(fallback.calls(), 0);
        assert_eq!(*specific.ids.lock().unwrap(), vec!["log_v2_payout".to_string()]);
    }

    #[tokio::test]
    async fn fallback_receives_unregistered_types() {
        let specific = Arc::new(Recorder::default());
        let fallback = Arc::new(Recorder::default());
        let registry = HandlerRegistry::<v2::Event>::builder()
            .on(v2::EventType::PayoutDone, specific.clone())
            .fallback(fallback.clone())
            .build();

        let dispatch = registry.dispatch(billing_paid()).await.unwrap();

        assert_eq!(dispatch, Dispatch::Fallback);
        assert_eq!(specific.calls(), 0);
        assert_eq!(fallback.calls(), 1);
    }

    #[tokio::test]
    async fn no_handler_is_acknowledged() {
        let registry = HandlerRegistry::<v2::Event>::default();

        let dispatch = registry.dispatch(billing_paid()).await.unwrap();

        assert_eq!(dispatch, Dispatch::Unhandled);
    }

    #[tokio::test]
    async fn later_registration_replaces_earlier() {
        let first = Arc::new(Recorder::default());
        let second = Arc::new(Recorder::default());
        let registry = HandlerRegistry::<v2::Event>::builder()
            .on(v2::EventType::PayoutDone, first.clone())
            .on(v2::EventType::PayoutDone, second.clone())
            .build();

        registry.dispatch(payout_done()).await.unwrap();

        assert_eq!(first.calls(), 0);
        assert_eq!(second.calls(), 1);
    }
}

mod closures {
    use super::*;

    #[tokio::test]
    async fn handler_fn_runs_closure() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let registry = HandlerRegistry::<v2::Event>::builder()
            .on(
                v2::EventType::BillingPaid,
                handler_fn(move |_event: v2::Event| {
                    let counter = Arc::clone(&counter);
                    async move {
                        counter.fetch_add(1, Ordering::SeqCst);
                        Ok::<(), HandlerError>(())
                    }
                }),
            )
            .build();

        registry.dispatch(billing_paid()).await.unwrap();

        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn handler_error_is_returned() {
        let registry = HandlerRegistry::<v2::Event>::builder()
            .fallback(handler_fn(|_event: v2::Event| async {
                Err::<(), HandlerError>("database unavailable".into())
            }))
            .build();

        let error = registry.dispatch(payout_done()).await.unwrap_err();

        assert_eq!(error.to_string(), "database unavailable");
    }
}

mod introspection {
    use super::*;

    #[test]
    fn reports_registered_handlers() {
        let registry = HandlerRegistry::<v2::Event>::builder()
            .on(v2::EventType::PayoutFailed, Arc::new(Recorder::default()))
            .build();

        assert!(registry.has_handler(v2::EventType::PayoutFailed));
        assert!(!registry.has_handler(v2::EventType::PayoutDone));
        assert!(!registry.has_fallback());
        assert!(format!("{registry:?}").contains("PayoutFailed"));
    }
}

//! Tests for response classification.

use super::classify::{Classification, classify, error_message};
use super::{HttpError, HttpResponse, RestError, RetryPolicy};
use http::StatusCode;
use serde_json::json;

fn response(status: StatusCode, body: &str) -> HttpResponse {
    HttpResponse::new(status, http::HeaderMap::new(), body.as_bytes().to_vec())
}

mod transport_failures {
    use super::*;

    #[test]
    fn timeout_is_retryable_transport_error() {
        let outcome = classify("/store/get", Err(HttpError::Timeout), &RetryPolicy::new());

        match outcome {
            Classification::Retryable(failure) => {
                assert!(failure.status.is_none());
                assert!(failure.error.is_transport());
                assert_eq!(failure.error.route(), Some("/store/get"));
            }
            other => panic!("Expected Retryable, got {other:?}"),
        }
    }

    #[test]
    fn connection_error_is_retryable() {
        let error = HttpError::Connection(Box::new(std::io::Error::other("reset")));
        let outcome = classify("/billing/list", Err(error), &RetryPolicy::new());

        assert!(outcome.is_retryable());
    }

    #[test]
    fn invalid_url_is_fatal() {
        let error = HttpError::InvalidUrl("no host".to_string());
        let outcome = classify("/billing/list", Err(error), &RetryPolicy::new());

        match outcome {
            Classification::Fatal(RestError::Transport { message, .. }) => {
                assert!(message.contains("no host"));
            }
            other => panic!("Expected fatal transport error, got {other:?}"),
        }
    }
}

mod statuses {
    use super::*;

    #[test]
    fn success_range_is_success() {
        for code in [200, 201, 204, 299] {
            let status = StatusCode::from_u16(code).unwrap();
            let outcome = classify("/x", Ok(response(status, "{}")), &RetryPolicy::new());
            assert!(
                matches!(outcome, Classification::Success(_)),
                "status {code}"
            );
        }
    }

    #[test]
    fn default_retryable_statuses_are_retryable() {
        for code in [408, 425, 429, 500, 502, 503, 504] {
            let status = StatusCode::from_u16(code).unwrap();
            let outcome = classify("/x", Ok(response(status, "")), &RetryPolicy::new());

            match outcome {
                Classification::Retryable(failure) => {
                    assert_eq!(failure.status, Some(status));
                    assert_eq!(failure.error.status(), Some(status));
                }
                other => panic!("status {code}: expected Retryable, got {other:?}"),
            }
        }
    }

    #[test]
    fn other_errors_are_fatal() {
        for code in [400, 401, 403, 404, 422, 501] {
            let status = StatusCode::from_u16(code).unwrap();
            let outcome = classify("/x", Ok(response(status, "")), &RetryPolicy::new());
            assert!(
                matches!(outcome, Classification::Fatal(RestError::Api { .. })),
                "status {code}"
            );
        }
    }

    #[test]
    fn custom_retryable_set_is_honoured() {
        let policy = RetryPolicy::new().with_retryable_statuses([418]);

        let teapot = classify("/x", Ok(response(StatusCode::IM_A_TEAPOT, "")), &policy);
        let unavailable = classify(
            "/x",
            Ok(response(StatusCode::SERVICE_UNAVAILABLE, "")),
            &policy,
        );

        assert!(teapot.is_retryable());
        assert!(matches!(unavailable, Classification::Fatal(_)));
    }
}

mod messages {
    use super::*;

    #[test]
    fn fatal_error_uses_structured_body() {
        let body = json!({"data": null, "error": "Invalid customer"}).to_string();
        let outcome = classify(
            "/customer/create",
            Ok(response(StatusCode::BAD_REQUEST, &body)),
            &RetryPolicy::new(),
        );

        match outcome {
            Classification::Fatal(RestError::Api {
                route,
                message,
                status,
            }) => {
                assert_eq!(route, "/customer/create");
                assert_eq!(message, "Invalid customer");
                assert_eq!(status, StatusCode::BAD_REQUEST);
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn fatal_error_without_body_uses_status() {
        let outcome = classify(
            "/store/get",
            Ok(response(StatusCode::UNAUTHORIZED, "<html>nope</html>")),
            &RetryPolicy::new(),
        );

        match outcome {
            Classification::Fatal(RestError::Api { message, .. }) => {
                assert_eq!(message, "401 Unauthorized");
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn error_message_prefers_error_field() {
        let body = json!({"message": "secondary", "error": "primary"}).to_string();
        assert_eq!(error_message(body.as_bytes()).as_deref(), Some("primary"));
    }

    #[test]
    fn error_message_falls_back_to_message_field() {
        let body = json!({"error": null, "message": "Token expired"}).to_string();
        assert_eq!(error_message(body.as_bytes()).as_deref(), Some("Token expired"));
    }

    #[test]
    fn error_message_ignores_non_objects() {
        assert_eq!(error_message(b"[1,2]"), None);
        assert_eq!(error_message(b"not json"), None);
        assert_eq!(error_message(b""), None);
    }

    #[test]
    fn error_message_stringifies_structured_errors() {
        let body = json!({"error": {"code": "E1"}}).to_string();
        assert_eq!(
            error_message(body.as_bytes()).as_deref(),
            Some(r#"{"code":"E1"}"#)
        );
    }
}

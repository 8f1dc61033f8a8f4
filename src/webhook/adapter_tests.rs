//! Tests for the `http` adapter and response building.

use http::{Request, StatusCode};

use super::test_fixtures::*;
use super::{
    HandlerRegistry, RawWebhookRequest, SIGNATURE_HEADER, WebhookConfig, WebhookGateway,
    WebhookRejection, WebhookRequest, handle_http, into_http_response, v1,
};

fn body_json(response: &http::Response<Vec<u8>>) -> serde_json::Value {
    serde_json::from_slice(response.body()).unwrap()
}

mod http_request {
    use super::*;

    #[test]
    fn reads_decoded_query_parameter() {
        let request = Request::post("/hook?foo=1&webhookSecret=a%2Bb%20c")
            .body(Vec::new())
            .unwrap();

        assert_eq!(request.query_param("webhookSecret").as_deref(), Some("a+b c"));
        assert_eq!(request.query_param("missing"), None);
    }

    #[test]
    fn request_without_query_has_no_parameters() {
        let request = Request::post("/hook").body(Vec::new()).unwrap();

        assert_eq!(request.query_param("webhookSecret"), None);
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let request = Request::post("/hook")
            .header("X-Webhook-Signature", "abc")
            .body(Vec::new())
            .unwrap();

        assert_eq!(request.header(SIGNATURE_HEADER), Some("abc"));
    }

    #[test]
    fn raw_body_is_untouched() {
        let request = Request::post("/hook").body(b" {\"a\":1} ".to_vec()).unwrap();

        assert_eq!(request.raw_body(), b" {\"a\":1} ");
    }

    #[test]
    fn raw_request_headers_are_case_insensitive() {
        let request = RawWebhookRequest::new(Vec::new()).with_header("X-Webhook-Signature", "sig");

        assert_eq!(request.header("x-webhook-signature"), Some("sig"));
    }
}

mod responses {
    use super::*;

    #[test]
    fn success_is_no_content() {
        let response = into_http_response(&Ok(()));

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.body().is_empty());
    }

    #[test]
    fn rejection_body_has_public_message_only() {
        let outcome = Err(WebhookRejection::InvalidPayload(
            "missing field `devMode` at line 1".to_string(),
        ));

        let response = into_http_response(&outcome);

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(&response), serde_json::json!({"error": "Invalid payload"}));
        assert_eq!(
            response.headers().get(http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn handler_failure_is_internal_error() {
        let outcome = Err(WebhookRejection::Handler("db password wrong".into()));

        let response = into_http_response(&outcome);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(&response),
            serde_json::json!({"error": "Internal server error"})
        );
    }
}

mod end_to_end {
    use super::*;

    fn gateway() -> WebhookGateway<v1::Event> {
        WebhookGateway::new(WebhookConfig::new(SECRET), HandlerRegistry::default()).unwrap()
    }

    #[tokio::test]
    async fn signed_http_request_gets_no_content() {
        let body = v1_withdraw("withdraw.done", "COMPLETE").to_string();
        let request = Request::post(format!("/hook?webhookSecret={SECRET}"))
            .header(SIGNATURE_HEADER, signature(body.as_bytes()))
            .body(body.into_bytes())
            .unwrap();

        let response = handle_http(&gateway(), &request).await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn wrong_secret_gets_unauthorized_body() {
        let request = Request::post("/hook?webhookSecret=nope")
            .body(b"{}".to_vec())
            .unwrap();

        let response = handle_http(&gateway(), &request).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(&response), serde_json::json!({"error": "Unauthorized"}));
    }
}

//! Router-level tests for the relay routes.
//!
//! The text provider is replaced by `MockTextProvider`, so these tests need
//! no network access.

mod common;

use axum::http::StatusCode;
use common::{get, json_body, post_json, post_raw, router_with};
use relay_service::services::providers::mock::{MockBehavior, MockTextProvider};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn itinerary_returns_generated_text_verbatim() {
    let provider = Arc::new(MockTextProvider::replying("9am: Louvre..."));
    let app = router_with(provider.clone());

    let response = post_json(
        app,
        "/generate-itinerary",
        r#"{"city":"Paris","interests":"art, food"}"#,
    )
    .await;
    let (status, body) = json_body(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "itinerary": "9am: Louvre..." }));
    assert_eq!(provider.calls(), 1);

    let prompt = &provider.prompts()[0];
    assert!(prompt.contains("itinerary for Paris"));
    assert!(prompt.contains("these interests: art, food"));
}

#[tokio::test]
async fn itinerary_missing_fields_is_bad_request_without_provider_call() {
    let cases = [
        r#"{"city":"Paris"}"#,
        r#"{"interests":"art, food"}"#,
        r#"{}"#,
        r#"{"city":"","interests":"art"}"#,
        r#"{"city":"Paris","interests":null}"#,
    ];

    for case in cases {
        let provider = Arc::new(MockTextProvider::replying("unused"));
        let app = router_with(provider.clone());

        let (status, body) = json_body(post_json(app, "/generate-itinerary", case).await).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {case}");
        assert_eq!(body, json!({ "error": "City and interests are required" }));
        assert_eq!(provider.calls(), 0, "provider called for {case}");
    }
}

#[tokio::test]
async fn itinerary_provider_failure_exposes_details() {
    let provider = Arc::new(MockTextProvider::failing("quota exceeded"));
    let app = router_with(provider);

    let (status, body) = json_body(
        post_json(
            app,
            "/generate-itinerary",
            r#"{"city":"Paris","interests":"art"}"#,
        )
        .await,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "error": "Failed to generate itinerary", "details": "quota exceeded" })
    );
}

#[tokio::test]
async fn chat_returns_generated_text_verbatim() {
    let provider = Arc::new(MockTextProvider::replying("  Hello!\n\nHow can I help?  "));
    let app = router_with(provider.clone());

    let (status, body) = json_body(post_json(app, "/chat", r#"{"message":"Hello"}"#).await).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "response": "  Hello!\n\nHow can I help?  " }));
    assert_eq!(provider.prompts(), vec!["Hello".to_string()]);
}

#[tokio::test]
async fn chat_forwards_message_as_prompt_without_template() {
    let provider = Arc::new(MockTextProvider::new(MockBehavior::Echo));
    let app = router_with(provider);

    let (status, body) = json_body(
        post_json(app, "/chat", r#"{"message":"Tell me about Kyoto"}"#).await,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Tell me about Kyoto");
}

#[tokio::test]
async fn chat_provider_failure_hides_details() {
    let provider = Arc::new(MockTextProvider::failing("quota exceeded"));
    let app = router_with(provider);

    let (status, body) = json_body(post_json(app, "/chat", r#"{"message":"Hello"}"#).await).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "error": "An error occurred while processing your request." })
    );
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn chat_missing_message_is_bad_request() {
    let provider = Arc::new(MockTextProvider::replying("unused"));
    let app = router_with(provider.clone());

    let (status, body) = json_body(post_json(app, "/chat", r#"{}"#).await).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Message is required" }));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn malformed_json_uses_catch_all_envelope() {
    let provider = Arc::new(MockTextProvider::replying("unused"));
    let app = router_with(provider.clone());

    let (status, body) = json_body(post_json(app, "/chat", r#"{"message":"#).await).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Something went wrong!");
    assert!(body["details"].as_str().is_some_and(|d| !d.is_empty()));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn itinerary_without_json_body_is_bad_request() {
    let cases = [
        (None, r#"{"city":"Paris","interests":"art"}"#),
        (Some("application/json"), ""),
        (
            Some("application/x-www-form-urlencoded"),
            "city=Paris&interests=art",
        ),
        (Some("text/plain"), "Paris"),
    ];

    for (content_type, body) in cases {
        let provider = Arc::new(MockTextProvider::replying("unused"));
        let app = router_with(provider.clone());

        let (status, response) = json_body(
            post_raw(app, "/generate-itinerary", content_type, body).await,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{content_type:?} {body}");
        assert_eq!(
            response,
            json!({ "error": "City and interests are required" })
        );
        assert_eq!(provider.calls(), 0);
    }
}

#[tokio::test]
async fn chat_without_json_body_is_bad_request() {
    let provider = Arc::new(MockTextProvider::replying("unused"));
    let app = router_with(provider.clone());

    let (status, body) = json_body(post_raw(app, "/chat", None, "").await).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Message is required" }));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn falsy_field_values_are_bad_request() {
    for case in [
        r#"{"city":0,"interests":"art"}"#,
        r#"{"city":"Paris","interests":false}"#,
    ] {
        let provider = Arc::new(MockTextProvider::replying("unused"));
        let app = router_with(provider.clone());

        let (status, _) = json_body(post_json(app, "/generate-itinerary", case).await).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {case}");
        assert_eq!(provider.calls(), 0);
    }
}

#[tokio::test]
async fn truthy_non_string_fields_are_interpolated() {
    let provider = Arc::new(MockTextProvider::replying("plan"));
    let app = router_with(provider.clone());

    let (status, body) = json_body(
        post_json(app, "/generate-itinerary", r#"{"city":42,"interests":"art"}"#).await,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "itinerary": "plan" }));
    assert!(provider.prompts()[0].contains("itinerary for 42"));
}

#[tokio::test]
async fn top_level_scalar_body_uses_catch_all_envelope() {
    let provider = Arc::new(MockTextProvider::replying("unused"));
    let app = router_with(provider.clone());

    let (status, body) = json_body(post_json(app, "/chat", "42").await).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Something went wrong!");
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn other_methods_on_relay_paths_fall_through_to_static_serving() {
    for path in ["/chat", "/generate-itinerary"] {
        let provider = Arc::new(MockTextProvider::replying("unused"));
        let app = router_with(provider.clone());

        let response = get(app, path).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND, "GET {path}");
        assert_eq!(provider.calls(), 0);
    }
}

#[tokio::test]
async fn provider_panic_is_converted_to_json_500() {
    let provider = Arc::new(MockTextProvider::new(MockBehavior::Panic(
        "provider exploded".to_string(),
    )));
    let app = router_with(provider);

    let (status, body) = json_body(post_json(app, "/chat", r#"{"message":"Hello"}"#).await).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "error": "Something went wrong!", "details": "provider exploded" })
    );
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let provider = Arc::new(MockTextProvider::replying("ok"));
    let app = router_with(provider);

    let response = post_json(app, "/chat", r#"{"message":"Hello"}"#).await;

    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["x-frame-options"], "DENY");
}

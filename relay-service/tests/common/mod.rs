#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use relay_service::config::{
    GeminiSettings, RelayConfig, StaticSettings, DEFAULT_GEMINI_API_BASE,
};
use relay_service::services::TextProvider;
use relay_service::{build_router, AppState};
use secrecy::Secret;
use serde_json::Value;
use service_core::config::Config;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

pub fn public_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("public")
}

pub fn test_config() -> RelayConfig {
    RelayConfig {
        common: Config {
            port: 0,
            ..Config::default()
        },
        gemini: GeminiSettings {
            api_key: Secret::new("test-api-key".to_string()),
            model: "gemini-2.0-flash".to_string(),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            timeout_secs: 5,
        },
        static_files: StaticSettings {
            dir: public_dir(),
            serve_index: true,
        },
        otlp_endpoint: None,
    }
}

pub fn router_with(provider: Arc<dyn TextProvider>) -> Router {
    build_router(AppState::new(test_config(), provider))
}

pub fn router_with_config(config: RelayConfig, provider: Arc<dyn TextProvider>) -> Router {
    build_router(AppState::new(config, provider))
}

pub async fn post_json(app: Router, path: &str, body: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// POST `body` with an optional `Content-Type` header.
pub async fn post_raw(
    app: Router,
    path: &str,
    content_type: Option<&str>,
    body: &str,
) -> Response {
    let mut builder = Request::builder().method("POST").uri(path);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    app.oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

pub async fn get(app: Router, path: &str) -> Response {
    app.oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn json_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).expect("response body is JSON");
    (status, value)
}

pub async fn text_body(response: Response) -> (StatusCode, String) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

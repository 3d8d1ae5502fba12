use crate::startup::AppState;
use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use service_core::error::AppError;
use tower::ServiceExt;
use tower_http::services::ServeFile;

/// Serve `index.html` from the static directory.
pub async fn index(State(state): State<AppState>, request: Request) -> Result<Response, AppError> {
    let path = state.config.static_files.dir.join("index.html");
    let response = match ServeFile::new(&path).oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };

    if response.status() == StatusCode::NOT_FOUND {
        tracing::warn!(path = %path.display(), "Index document missing");
        return Err(AppError::NotFound(anyhow::anyhow!("Index document not found")));
    }

    Ok(response.map(Body::new))
}

pub async fn metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        crate::services::metrics::get_metrics(),
    )
}

use crate::handlers::extract::JsonBody;
use crate::services::relay::{self, RelayRequest};
use crate::startup::AppState;
use axum::{extract::State, Json};
use serde_json::Value;
use service_core::error::AppError;

/// Shared handler for every relay route; `R` selects the route profile and prompt.
pub async fn relay_handler<R: RelayRequest>(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<R>,
) -> Result<Json<Value>, AppError> {
    let body = relay::relay(state.text_provider.as_ref(), request).await?;
    Ok(Json(body))
}

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use service_core::error::AppError;

/// Lenient JSON body extractor.
///
/// Bodies that are not declared as `application/json`, empty bodies and
/// top-level arrays are read as an empty object, so missing input surfaces as
/// the route's 400. Only unparseable JSON and top-level scalars are rejected,
/// with the catch-all `AppError` envelope.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = is_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::InternalError(anyhow::anyhow!(rejection.body_text())))?;

        let value = if is_json && !bytes.iter().all(u8::is_ascii_whitespace) {
            serde_json::from_slice::<Value>(&bytes)
                .map_err(|e| AppError::InternalError(anyhow::anyhow!(e)))?
        } else {
            Value::Object(Default::default())
        };

        let value = match value {
            Value::Object(_) => value,
            Value::Array(_) => Value::Object(Default::default()),
            other => {
                return Err(AppError::InternalError(anyhow::anyhow!(
                    "Request body must be a JSON object, got `{other}`"
                )));
            }
        };

        serde_json::from_value(value)
            .map(JsonBody)
            .map_err(|e| AppError::InternalError(anyhow::anyhow!(e)))
    }
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

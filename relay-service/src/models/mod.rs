//! Request bodies accepted by the relay routes.
//!
//! Fields are optional at the serde level so that a missing field surfaces as
//! a 400 from validation instead of a body rejection.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ItineraryRequest {
    #[serde(default, deserialize_with = "text_field")]
    #[validate(required, length(min = 1))]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    #[validate(required, length(min = 1))]
    pub interests: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ChatRequest {
    #[serde(default, deserialize_with = "text_field")]
    #[validate(required, length(min = 1))]
    pub message: Option<String>,
}

/// Accept any JSON value as prompt text.
///
/// `null`, `false` and zero count as absent. Other scalars are rendered as
/// text, arrays and objects as their compact JSON.
fn text_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) => (n.as_f64() != Some(0.0)).then(|| n.to_string()),
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

//! Route table and the shared relay path.
//!
//! Every relay route is described by a [`RouteProfile`]: where it is mounted,
//! which JSON field carries the generated text, and how failures are reported.
//! Request bodies pick their route and prompt through [`RelayRequest`], so all
//! routes share one validation / generation / error-translation path.

use crate::models::{ChatRequest, ItineraryRequest};
use crate::services::metrics;
use crate::services::providers::TextProvider;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use service_core::error::AppError;
use std::time::Instant;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayRoute {
    Itinerary,
    Chat,
}

#[derive(Debug)]
pub struct RouteProfile {
    /// Mount path.
    pub path: &'static str,
    /// Metric / log label.
    pub name: &'static str,
    /// JSON field holding the generated text on success.
    pub response_field: &'static str,
    /// 400 message when required input is missing.
    pub invalid_message: &'static str,
    /// 500 message when the provider fails.
    pub failure_message: &'static str,
    /// Whether the provider error text is returned as `details`.
    pub expose_details: bool,
}

const ITINERARY: RouteProfile = RouteProfile {
    path: "/generate-itinerary",
    name: "itinerary",
    response_field: "itinerary",
    invalid_message: "City and interests are required",
    failure_message: "Failed to generate itinerary",
    expose_details: true,
};

const CHAT: RouteProfile = RouteProfile {
    path: "/chat",
    name: "chat",
    response_field: "response",
    invalid_message: "Message is required",
    failure_message: "An error occurred while processing your request.",
    expose_details: false,
};

impl RelayRoute {
    pub fn profile(self) -> &'static RouteProfile {
        match self {
            RelayRoute::Itinerary => &ITINERARY,
            RelayRoute::Chat => &CHAT,
        }
    }

    pub fn path(self) -> &'static str {
        self.profile().path
    }
}

/// A request body that can be relayed to the text provider.
pub trait RelayRequest: DeserializeOwned + Validate + Send + 'static {
    const ROUTE: RelayRoute;

    /// Build the prompt. Only called after validation succeeded.
    fn prompt(&self) -> String;
}

impl RelayRequest for ItineraryRequest {
    const ROUTE: RelayRoute = RelayRoute::Itinerary;

    fn prompt(&self) -> String {
        itinerary_prompt(
            self.city.as_deref().unwrap_or_default(),
            self.interests.as_deref().unwrap_or_default(),
        )
    }
}

impl RelayRequest for ChatRequest {
    const ROUTE: RelayRoute = RelayRoute::Chat;

    fn prompt(&self) -> String {
        self.message.clone().unwrap_or_default()
    }
}

pub fn itinerary_prompt(city: &str, interests: &str) -> String {
    format!(
        "Create a detailed day trip itinerary for {city} focusing on these interests: {interests}.\n\
         Please include:\n\
         - A morning, afternoon, and evening schedule\n\
         - Specific locations and attractions\n\
         - Approximate time spent at each location\n\
         - Transportation suggestions between locations\n\
         - Local food and restaurant recommendations\n\
         - Tips for the best experience\n\
         \n\
         Format the itinerary in a clear, easy-to-read way with times and descriptions."
    )
}

/// Validate `request`, send its prompt to `provider` and wrap the generated
/// text in the route's JSON envelope.
///
/// The provider is never called for invalid input.
pub async fn relay<R: RelayRequest>(
    provider: &dyn TextProvider,
    request: R,
) -> Result<Value, AppError> {
    let profile = R::ROUTE.profile();

    if request.validate().is_err() {
        metrics::record_relay_outcome(profile.name, "invalid");
        return Err(AppError::BadRequest(anyhow::anyhow!(profile.invalid_message)));
    }

    let prompt = request.prompt();
    let start = Instant::now();
    let result = provider.generate(&prompt).await;
    metrics::record_generation_latency(profile.name, start.elapsed());

    match result {
        Ok(response) => {
            tracing::info!(
                route = profile.name,
                model = provider.model(),
                input_tokens = response.input_tokens,
                output_tokens = response.output_tokens,
                finish_reason = ?response.finish_reason,
                "Generated response"
            );
            metrics::record_relay_outcome(profile.name, "success");
            metrics::record_tokens(profile.name, response.input_tokens, response.output_tokens);

            let mut body = Map::new();
            body.insert(
                profile.response_field.to_string(),
                Value::String(response.text),
            );
            Ok(Value::Object(body))
        }
        Err(err) => {
            tracing::error!(
                route = profile.name,
                model = provider.model(),
                kind = err.kind(),
                error = %err,
                "Text generation failed"
            );
            metrics::record_relay_outcome(profile.name, err.kind());

            Err(AppError::Upstream {
                error: profile.failure_message.to_string(),
                details: profile.expose_details.then(|| err.to_string()),
            })
        }
    }
}

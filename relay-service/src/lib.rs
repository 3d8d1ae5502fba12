//! relay-service: forwards itinerary and chat requests to a generative-text
//! provider and returns the generated text as JSON.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

pub use startup::{build_router, AppState, Application};

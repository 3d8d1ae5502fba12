//! HTTP handlers for the relay service.

pub mod app;
pub mod extract;
pub mod health;
pub mod relay;

pub use app::{index, metrics};
pub use health::{health_check, readiness_check};
pub use relay::relay_handler;

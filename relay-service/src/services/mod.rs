pub mod metrics;
pub mod providers;
pub mod relay;

pub use providers::{ProviderError, TextProvider};
pub use relay::{RelayRequest, RelayRoute};

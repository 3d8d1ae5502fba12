pub mod metrics;
pub mod panic;
pub mod security_headers;
pub mod tracing;

pub use metrics::metrics_middleware;
pub use panic::handle_panic;
pub use security_headers::security_headers_middleware;
pub use tracing::{REQUEST_ID_HEADER, request_id_middleware};

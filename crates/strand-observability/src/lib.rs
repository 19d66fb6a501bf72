//! Observability for the Strand SSR stack.
//!
//! - `StructuredLogger` - Request-scoped structured logging
//! - `RequestMetrics` - Per-request render timing snapshot

mod logging;
mod metrics;

pub use logging::*;
pub use metrics::*;

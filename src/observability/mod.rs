//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Console, poller and client code produce:
//!     → logging.rs (structured tracing events, stderr)
//!     → metrics.rs (fetch, gate and mutation counters)
//!
//! Consumers:
//!     → Operator terminal / log capture
//!     → Optional Prometheus scrape endpoint
//! ```
//!
//! # Design Decisions
//! - Logs go to stderr so the backend table on stdout stays readable
//! - Metrics are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;

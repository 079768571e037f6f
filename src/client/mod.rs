//! Client side of the balancer modification API.
//!
//! # Data Flow
//! ```text
//! Read path:
//!     PollerSession tick / restart
//!     → fetcher.rs (GET /backends, classify reply)
//!     → Ok: render module | Err: failure gate
//!
//! Write path:
//!     add / del command
//!     → mutation.rs (PUT / DELETE /backends, spawned)
//!     → MutationOutcome on channel → console loop → PollerSession::restart
//! ```
//!
//! # Design Decisions
//! - `BackendApi` is the only seam to the network; tests swap it out
//! - Requests never block the console loop; results come back over channels
//! - Read and write failures are classified separately (gate vs. log)

pub mod fetcher;
pub mod mutation;
pub mod transport;

#[cfg(test)]
pub(crate) mod scripted;

pub use fetcher::{fetch, FetchResult};
pub use mutation::{MutationClient, MutationKind, MutationOutcome};
pub use transport::{ApiReply, BackendApi, HttpBackendApi, TransportError};

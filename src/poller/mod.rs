//! Polling subsystem.
//!
//! # Data Flow
//! ```text
//! restart() (console start, successful mutation, `refresh`)
//!     → disarm timer, reset gate
//!     → dispatch fetch now
//!     → arm timer (interval)
//!
//! Timer tick:
//!     gate tripped → disarm, stop
//!     surface hidden → skip
//!     otherwise → dispatch fetch (supersedes any in-flight fetch)
//!
//! Fetch result (current generation only):
//!     Ok → render → show table
//!     Err / bad data → gate.report_failure → disarm timer, alert once
//! ```
//!
//! # States
//! ```text
//! Stopped → Running: restart()
//! Running → Running: successful or skipped tick
//! Running → Failed:  any read-path error
//! Failed  → Running: restart()
//! ```
//!
//! # Design Decisions
//! - One owned `PollerSession`, no ambient globals
//! - Single-flight fetches: newer dispatches abort and outdate older ones
//! - Visibility only gates new ticks; it never cancels a request

pub mod gate;
pub mod session;

pub use gate::FailureGate;
pub use session::{PollerSession, SessionEvent, SessionState, DEFAULT_INTERVAL};

//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Init logging/metrics → Build console → restart()
//!
//! Shutdown (shutdown.rs):
//!     Ctrl-C or `quit` → trigger → console loop exits → PollerSession::stop()
//!
//! Signals (signals.rs):
//!     SIGINT → Shutdown::trigger
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownSignal};

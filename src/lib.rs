//! Operator console for a load balancer's backend list.
//!
//! Polls the balancer's modification API, renders the backend table, and
//! sends add/remove requests. Polling stops at the first read-path failure
//! and restarts after every accepted change.

pub mod client;
pub mod config;
pub mod console;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod observability;
pub mod poller;
pub mod render;

pub use config::ConsoleConfig;
pub use console::Console;
pub use lifecycle::Shutdown;
pub use poller::PollerSession;

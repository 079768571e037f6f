//! Operator console.
//!
//! # Responsibilities
//! - Own the poller session and the mutation client (app.rs)
//! - Parse operator commands (command.rs)
//! - Collect and validate add-backend input (form.rs)
//! - Read operator lines off the runtime (input.rs)
//!
//! # Data Flow
//! ```text
//! stdin → input.rs thread → line channel → command.rs → app.rs
//!     add      → form.rs → MutationClient::add
//!     del      → table delete control → MutationClient::remove
//!     refresh  → PollerSession::restart
//!     hide/show → PollerSession::set_visible
//!
//! MutationOutcome (200) → PollerSession::restart
//! ```

pub mod app;
pub mod command;
pub mod form;
pub mod input;

pub use app::{Console, Flow};
pub use command::{Command, CommandError};
pub use form::{AddBackendForm, FormError};
pub use input::{spawn_line_reader, CommandLines};

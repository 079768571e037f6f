//! Presentation subsystem.
//!
//! # Responsibilities
//! - Project a fetched backend document into a display table (table.rs)
//! - Deliver tables, alerts and notices to the operator (surface.rs)
//!
//! # Design Decisions
//! - Rendering is a pure function; the session decides what to show
//! - A malformed document renders nothing, never a partial table
//! - Surfaces are swappable: terminal for the binary, memory for embedding

pub mod surface;
pub mod table;

pub use surface::{MemorySurface, OperatorSurface, TerminalSurface};
pub use table::{render, BackendRow, BackendTable, DeleteControl, Liveness, RenderError};

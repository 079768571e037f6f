//! Backend data model.
//!
//! # Data Flow
//! ```text
//! GET /backends body
//!     → serde_json::Value (fetcher, syntax only)
//!     → record.rs (schema check, one record at a time)
//!     → BackendList (validated, display order preserved)
//! ```
//!
//! # Design Decisions
//! - Records are server-owned; the console never edits them locally
//! - Every record is validated on its own so all bad entries are reported
//! - A single bad record still rejects the whole list

pub mod record;

pub use record::{printable_host, BackendKey, BackendList, BackendRecord, RecordError};

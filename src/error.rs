//! Error taxonomy shared by the read and write paths.
//!
//! Read-path errors ([`ReadError`]) all route through the failure gate.
//! Write-path errors ([`MutationError`]) are only logged.

use thiserror::Error;

use crate::client::transport::TransportError;
use crate::model::RecordError;
use crate::render::RenderError;

/// A failed poll of `GET /backends`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    /// The request could not be constructed at all.
    #[error("request could not be built: {0}")]
    Request(String),

    /// Network failure or timeout.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with something other than 200.
    #[error("unexpected response status {0}")]
    Status(u16),

    /// The body is not JSON.
    #[error("invalid json: {0}")]
    Protocol(String),

    /// The JSON does not match the backend schema.
    #[error("invalid backend data: {}", describe_records(.0))]
    Data(Vec<(usize, RecordError)>),
}

impl ReadError {
    /// Operator-facing reason shown in the failure alert.
    pub fn reason(&self) -> String {
        match self {
            ReadError::Request(_) => "Error while making request.".to_string(),
            ReadError::Transport(_) => "Request error.".to_string(),
            ReadError::Status(code) => format!("Unexpected response status {}.", code),
            ReadError::Protocol(_) => "Invalid json data.".to_string(),
            ReadError::Data(_) => "Invalid backend data.".to_string(),
        }
    }

    /// Short label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ReadError::Request(_) => "request",
            ReadError::Transport(_) => "transport",
            ReadError::Status(_) => "status",
            ReadError::Protocol(_) => "protocol",
            ReadError::Data(_) => "data",
        }
    }

    /// Parse and data failures leave nothing trustworthy to display.
    pub fn clears_table(&self) -> bool {
        matches!(self, ReadError::Protocol(_) | ReadError::Data(_))
    }
}

impl From<TransportError> for ReadError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Build(msg) => ReadError::Request(msg),
            other => ReadError::Transport(other.to_string()),
        }
    }
}

impl From<RenderError> for ReadError {
    fn from(e: RenderError) -> Self {
        ReadError::Data(e.problems)
    }
}

/// A failed add or delete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("server rejected the change with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

pub(crate) fn describe_records(problems: &[(usize, RecordError)]) -> String {
    problems
        .iter()
        .map(|(index, e)| format!("record {}: {}", index, e))
        .collect::<Vec<_>>()
        .join("; ")
}

//! Backend table projection.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::error::describe_records;
use crate::model::record::parse_list;
use crate::model::{printable_host, BackendKey, BackendRecord, RecordError};

/// Liveness label shown in the status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    Alive,
    Dead,
}

impl Liveness {
    /// Text for the status column.
    pub fn label(&self) -> &'static str {
        match self {
            Liveness::Alive => "ALIVE",
            Liveness::Dead => "DEAD",
        }
    }
}

impl From<bool> for Liveness {
    fn from(alive: bool) -> Self {
        if alive {
            Liveness::Alive
        } else {
            Liveness::Dead
        }
    }
}

/// Delete action bound to one row's backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteControl {
    target: BackendKey,
}

impl DeleteControl {
    /// The backend this control deletes.
    pub fn target(&self) -> &BackendKey {
        &self.target
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendRow {
    pub host: String,
    pub port: u16,
    pub status: Liveness,
    pub delete: DeleteControl,
}

impl From<BackendRecord> for BackendRow {
    fn from(record: BackendRecord) -> Self {
        let delete = DeleteControl { target: record.key() };
        Self {
            host: record.host,
            port: record.port,
            status: record.alive.into(),
            delete,
        }
    }
}

/// The rendered view. Either complete or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendTable {
    rows: Vec<BackendRow>,
}

impl BackendTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Rows in server order.
    pub fn rows(&self) -> &[BackendRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Delete control of a row, numbered from 1 as displayed.
    pub fn delete_control(&self, row_number: usize) -> Option<&DeleteControl> {
        row_number
            .checked_sub(1)
            .and_then(|index| self.rows.get(index))
            .map(|row| &row.delete)
    }
}

impl fmt::Display for BackendTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return writeln!(f, "(no backends)");
        }

        let hosts: Vec<_> = self.rows.iter().map(|r| printable_host(&r.host)).collect();
        let host_width = hosts.iter().map(|h| h.chars().count()).max().unwrap_or(0).max(4);

        writeln!(f, "{:>3}  {:<host_width$}  {:>5}  {:<6}", "#", "HOST", "PORT", "STATUS")?;
        for (index, (row, host)) in self.rows.iter().zip(&hosts).enumerate() {
            writeln!(
                f,
                "{:>3}  {:<host_width$}  {:>5}  {:<6}  [del {}]",
                index + 1,
                host,
                row.port,
                row.status.label(),
                index + 1,
            )?;
        }
        Ok(())
    }
}

/// The document did not match the backend schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid backend data: {}", describe_records(.problems))]
pub struct RenderError {
    pub problems: Vec<(usize, RecordError)>,
}

/// Project a fetched document into a table.
///
/// `None` renders an empty table. Any bad record rejects the whole document.
pub fn render(doc: Option<&Value>) -> Result<BackendTable, RenderError> {
    let Some(doc) = doc else {
        return Ok(BackendTable::empty());
    };

    let records = parse_list(doc).map_err(|problems| RenderError { problems })?;

    Ok(BackendTable {
        rows: records.into_iter().map(BackendRow::from).collect(),
    })
}

//! Operator-facing output.

use std::io::{self, Stderr, Stdout, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::render::table::BackendTable;

/// Where rendered tables and operator messages go.
pub trait OperatorSurface: Send {
    /// Replace the displayed table wholesale.
    fn show_table(&mut self, table: &BackendTable);

    /// Blocking, prominent notification. Returns once the operator has been told.
    fn alert(&mut self, message: &str);

    /// Informational line (command feedback, help text).
    fn notice(&mut self, message: &str);
}

/// Writes tables to one stream and alerts to another.
pub struct TerminalSurface<O, E> {
    out: O,
    err: E,
}

impl TerminalSurface<Stdout, Stderr> {
    /// Tables and notices to stdout, alerts to stderr.
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write + Send, E: Write + Send> TerminalSurface<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    /// Take back the output and alert streams.
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write + Send, E: Write + Send> OperatorSurface for TerminalSurface<O, E> {
    fn show_table(&mut self, table: &BackendTable) {
        if let Err(e) = write!(self.out, "\n{}", table).and_then(|_| self.out.flush()) {
            tracing::error!(error = %e, "Failed to write backend table");
        }
    }

    fn alert(&mut self, message: &str) {
        let banner = "!".repeat(60);
        if let Err(e) = writeln!(self.err, "\n{banner}\n{message}\n{banner}").and_then(|_| self.err.flush()) {
            tracing::error!(error = %e, "Failed to write operator alert");
        }
    }

    fn notice(&mut self, message: &str) {
        if let Err(e) = writeln!(self.out, "{}", message).and_then(|_| self.out.flush()) {
            tracing::error!(error = %e, "Failed to write notice");
        }
    }
}

#[derive(Debug, Default)]
struct Recorded {
    tables: Vec<BackendTable>,
    alerts: Vec<String>,
    notices: Vec<String>,
}

/// Keeps everything shown in memory. Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    recorded: Arc<Mutex<Recorded>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Recorded> {
        self.recorded.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// The table currently displayed, if any was ever shown.
    pub fn current_table(&self) -> Option<BackendTable> {
        self.lock().tables.last().cloned()
    }

    /// How many times a table was shown.
    pub fn tables_shown(&self) -> usize {
        self.lock().tables.len()
    }

    /// Alerts raised so far, oldest first.
    pub fn alerts(&self) -> Vec<String> {
        self.lock().alerts.clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.lock().notices.clone()
    }
}

impl OperatorSurface for MemorySurface {
    fn show_table(&mut self, table: &BackendTable) {
        self.lock().tables.push(table.clone());
    }

    fn alert(&mut self, message: &str) {
        self.lock().alerts.push(message.to_string());
    }

    fn notice(&mut self, message: &str) {
        self.lock().notices.push(message.to_string());
    }
}

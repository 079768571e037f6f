//! Backend records and their wire schema.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Identity of a backend target. This is also the body of PUT/DELETE requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BackendKey {
    pub host: String,
    pub port: u16,
}

impl BackendKey {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for BackendKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", printable_host(&self.host), self.port)
    }
}

/// Host text safe to write to a terminal.
///
/// The balancer does not validate hosts, so control characters (ANSI escape
/// sequences included) are shown escaped rather than interpreted.
pub fn printable_host(host: &str) -> Cow<'_, str> {
    if host.chars().any(char::is_control) {
        Cow::Owned(host.escape_debug().to_string())
    } else {
        Cow::Borrowed(host)
    }
}

/// One proxied upstream target as reported by the balancer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendRecord {
    pub host: String,
    pub port: u16,
    pub alive: bool,
}

impl BackendRecord {
    /// The identity used for delete requests.
    pub fn key(&self) -> BackendKey {
        BackendKey::new(self.host.clone(), self.port)
    }

    /// Validate one element of the backend array.
    pub fn from_value(value: &Value) -> Result<Self, RecordError> {
        let wire = WireRecord::deserialize(value).map_err(|e| RecordError::Schema(e.to_string()))?;

        if wire.host.is_empty() {
            return Err(RecordError::EmptyHost);
        }

        let port = wire.port.into_port()?;

        Ok(Self {
            host: wire.host,
            port,
            alive: wire.alive,
        })
    }
}

/// Ordered list of records. Order is display order only.
pub type BackendList = Vec<BackendRecord>;

/// Reasons a single record fails the schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("{0}")]
    Schema(String),

    #[error("host must not be empty")]
    EmptyHost,

    #[error("port {0} out of range 1-65535")]
    PortOutOfRange(i64),

    #[error("port '{0}' is not a number")]
    PortNotNumeric(String),
}

#[derive(Deserialize)]
struct WireRecord {
    host: String,
    port: WirePort,
    alive: bool,
}

/// The balancer encodes ports as quoted strings; hand-written clients send numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum WirePort {
    Number(i64),
    Text(String),
}

impl WirePort {
    fn into_port(self) -> Result<u16, RecordError> {
        let raw = match self {
            WirePort::Number(n) => n,
            WirePort::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| RecordError::PortNotNumeric(s.clone()))?,
        };

        match u16::try_from(raw) {
            Ok(port) if port != 0 => Ok(port),
            _ => Err(RecordError::PortOutOfRange(raw)),
        }
    }
}

/// Validate a whole backend document.
///
/// Returns every offending index with its error so the caller can report all
/// of them, not just the first.
pub fn parse_list(value: &Value) -> Result<BackendList, Vec<(usize, RecordError)>> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(vec![(
                0,
                RecordError::Schema(format!("expected an array of backends, got {}", kind_of(other))),
            )])
        }
    };

    let mut records = Vec::with_capacity(items.len());
    let mut errors = Vec::new();

    for (index, item) in items.iter().enumerate() {
        match BackendRecord::from_value(item) {
            Ok(record) => records.push(record),
            Err(e) => errors.push((index, e)),
        }
    }

    if errors.is_empty() {
        Ok(records)
    } else {
        Err(errors)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

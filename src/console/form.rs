//! The add-backend form.

use thiserror::Error;

use crate::client::mutation::MutationClient;
use crate::client::transport::BackendApi;
use crate::model::BackendKey;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("host is required")]
    MissingHost,

    #[error("'{0}' is not a valid port (1-65535)")]
    InvalidPort(String),
}

/// Parse an operator-entered port.
pub fn parse_port(raw: &str) -> Result<u16, FormError> {
    match raw.trim().parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(FormError::InvalidPort(raw.trim().to_string())),
    }
}

/// Two text fields, submitted together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddBackendForm {
    host: String,
    port: String,
}

impl AddBackendForm {
    /// An empty form.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_host(&mut self, host: impl Into<String>) {
        self.host = host.into();
    }

    pub fn set_port(&mut self, port: impl Into<String>) {
        self.port = port.into();
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn is_empty(&self) -> bool {
        self.host.is_empty() && self.port.is_empty()
    }

    /// Reset both fields. Called after a successful submit.
    pub fn clear(&mut self) {
        self.host.clear();
        self.port.clear();
    }

    /// Read the fields as a backend key without submitting.
    pub fn read(&self) -> Result<BackendKey, FormError> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(FormError::MissingHost);
        }
        let port = parse_port(&self.port)?;
        Ok(BackendKey::new(host, port))
    }

    /// Dispatch an add request for the entered backend, then clear the fields.
    ///
    /// Invalid input is not sent and the fields are left as entered.
    pub fn submit<A: BackendApi>(&mut self, client: &MutationClient<A>) -> Result<BackendKey, FormError> {
        let key = self.read()?;
        client.add(key.clone());
        self.clear();
        Ok(key)
    }
}

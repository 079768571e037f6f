//! Read path: fetch and classify the backend list.

use serde_json::Value;

use crate::client::transport::{ApiReply, BackendApi};
use crate::error::ReadError;
use crate::observability::metrics;

/// `Ok(None)` means the server has no backends.
pub type FetchResult = Result<Option<Value>, ReadError>;

/// Issue `GET /backends` and classify the reply.
pub async fn fetch<A: BackendApi>(api: &A) -> FetchResult {
    let result = match api.list_backends().await {
        Ok(reply) => classify(reply),
        Err(e) => Err(ReadError::from(e)),
    };

    match &result {
        Ok(doc) => {
            tracing::debug!(empty = doc.is_none(), "Backend list fetched");
            metrics::record_fetch("ok");
        }
        Err(e) => {
            tracing::warn!(kind = e.kind(), error = %e, "Fetching backend list failed");
            metrics::record_fetch(e.kind());
        }
    }

    result
}

/// Turn a raw reply into a JSON document.
///
/// Only syntax is checked here; the record schema is the renderer's concern.
pub fn classify(reply: ApiReply) -> FetchResult {
    if !reply.is_ok() {
        return Err(ReadError::Status(reply.status));
    }

    let body = reply.body.trim();
    if body.is_empty() {
        return Ok(None);
    }

    let doc: Value = serde_json::from_str(body).map_err(|e| ReadError::Protocol(e.to_string()))?;

    if doc.is_null() {
        Ok(None)
    } else {
        Ok(Some(doc))
    }
}

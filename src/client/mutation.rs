//! Write path: add and remove backends.
//!
//! Mutations run as spawned tasks. Their outcomes are delivered to the console
//! loop, which restarts polling after every accepted change instead of
//! patching the displayed list.

use std::fmt;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::client::transport::BackendApi;
use crate::error::MutationError;
use crate::model::BackendKey;
use crate::observability::metrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Add,
    Remove,
}

impl MutationKind {
    /// HTTP method used for this change.
    pub fn method(&self) -> &'static str {
        match self {
            MutationKind::Add => "PUT",
            MutationKind::Remove => "DELETE",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationKind::Add => write!(f, "add"),
            MutationKind::Remove => write!(f, "remove"),
        }
    }
}

/// Result of one add/remove request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    pub kind: MutationKind,
    pub key: BackendKey,
    pub result: Result<(), MutationError>,
}

impl MutationOutcome {
    /// Only an accepted change warrants a resynchronization.
    pub fn needs_resync(&self) -> bool {
        self.result.is_ok()
    }
}

/// Issues mutations without blocking the caller.
pub struct MutationClient<A> {
    api: A,
    outcomes: mpsc::UnboundedSender<MutationOutcome>,
}

impl<A: BackendApi> MutationClient<A> {
    /// Create a client and the receiver its outcomes arrive on.
    pub fn new(api: A) -> (Self, mpsc::UnboundedReceiver<MutationOutcome>) {
        let (outcomes, rx) = mpsc::unbounded_channel();
        (Self { api, outcomes }, rx)
    }

    /// Send `PUT {base}/backends` for `key`. The outcome arrives on the receiver from [`new`](Self::new).
    pub fn add(&self, key: BackendKey) -> JoinHandle<()> {
        self.dispatch(MutationKind::Add, key)
    }

    /// Send `DELETE {base}/backends` for `key`. The outcome arrives on the receiver from [`new`](Self::new).
    pub fn remove(&self, key: BackendKey) -> JoinHandle<()> {
        self.dispatch(MutationKind::Remove, key)
    }

    fn dispatch(&self, kind: MutationKind, key: BackendKey) -> JoinHandle<()> {
        let api = self.api.clone();
        let outcomes = self.outcomes.clone();

        tracing::info!(kind = %kind, backend = %key, method = kind.method(), "Sending backend change");

        tokio::spawn(async move {
            let result = perform(&api, kind, &key).await;
            let _ = outcomes.send(MutationOutcome { kind, key, result });
        })
    }
}

/// Send one mutation and interpret the reply.
pub async fn perform<A: BackendApi>(api: &A, kind: MutationKind, key: &BackendKey) -> Result<(), MutationError> {
    let reply = match kind {
        MutationKind::Add => api.add_backend(key).await,
        MutationKind::Remove => api.remove_backend(key).await,
    };

    let result = match reply {
        Ok(reply) if reply.is_ok() => Ok(()),
        Ok(reply) => Err(MutationError::Rejected {
            status: reply.status,
            body: reply.body.trim().to_string(),
        }),
        Err(e) => Err(MutationError::from(e)),
    };

    let label = match &result {
        Ok(()) => "ok",
        Err(MutationError::Transport(_)) => "transport",
        Err(MutationError::Rejected { .. }) => "rejected",
    };
    metrics::record_mutation(kind, label);

    result
}

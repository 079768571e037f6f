//! Fail-stop circuit breaker for the read path.
//!
//! Unlike a per-backend breaker there is no half-open trial request: once tripped the
//! gate stays open until the session is explicitly restarted.

use tokio::time::Interval;

use crate::render::OperatorSurface;

#[derive(Debug, Default)]
pub struct FailureGate {
    tripped: bool,
    trips: u64,
}

impl FailureGate {
    /// A gate that has not tripped.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a failure has been reported since the last reset.
    pub fn is_tripped(&self) -> bool {
        self.tripped
    }

    /// Total number of times the gate has tripped over the session lifetime.
    pub fn trips(&self) -> u64 {
        self.trips
    }

    /// Report a read-path failure.
    ///
    /// The first report disarms `timer`, trips the gate and alerts the
    /// operator. Later reports are ignored until [`reset`](Self::reset).
    /// Returns `true` if this call tripped the gate.
    pub fn report_failure(
        &mut self,
        reason: &str,
        timer: &mut Option<Interval>,
        surface: &mut dyn OperatorSurface,
    ) -> bool {
        if self.tripped {
            tracing::debug!(reason, "Failure gate already tripped, ignoring");
            return false;
        }

        *timer = None;
        self.tripped = true;
        self.trips += 1;

        tracing::error!(reason, "Fetching update failed, polling stopped");
        surface.alert(&alert_message(reason));

        true
    }

    /// Re-arm the gate. Called by `restart()`.
    pub fn reset(&mut self) {
        self.tripped = false;
    }
}

/// Text of the blocking operator alert.
pub fn alert_message(reason: &str) -> String {
    format!("Fetching update failed: {}\n\nFetching stopped.", reason)
}

//! The polling session: timer, gate, single-flight fetches and the displayed table.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use crate::client::fetcher::{self, FetchResult};
use crate::client::transport::BackendApi;
use crate::config::PollingConfig;
use crate::error::ReadError;
use crate::observability::metrics;
use crate::poller::gate::FailureGate;
use crate::render::{render, BackendTable, OperatorSurface};

/// Poll interval used by `restart()` unless configured otherwise.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(PollingConfig::DEFAULT_INTERVAL_MS);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Stopped,
    Running,
    Failed,
}

/// Something the console loop must hand back to [`PollerSession::handle`].
#[derive(Debug)]
pub enum SessionEvent {
    Tick,
    Fetched { generation: u64, result: FetchResult },
}

struct InFlight {
    generation: u64,
    task: JoinHandle<()>,
}

/// Keeps the displayed table in step with the balancer.
///
/// Owns the poll timer, the failure gate and at most one in-flight fetch.
/// Drive it with [`next_event`](Self::next_event) and [`handle`](Self::handle).
pub struct PollerSession<A> {
    api: A,
    interval: Duration,
    timer: Option<Interval>,
    gate: FailureGate,
    visible: bool,
    generation: u64,
    in_flight: Option<InFlight>,
    results_tx: mpsc::UnboundedSender<(u64, FetchResult)>,
    results_rx: mpsc::UnboundedReceiver<(u64, FetchResult)>,
    surface: Box<dyn OperatorSurface>,
    table: BackendTable,
    fetches: u64,
    restarts: u64,
}

impl<A: BackendApi> PollerSession<A> {
    /// Create a stopped session. Nothing is fetched until `restart()`.
    pub fn new(api: A, surface: Box<dyn OperatorSurface>, interval: Duration) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        Self {
            api,
            interval,
            timer: None,
            gate: FailureGate::new(),
            visible: true,
            generation: 0,
            in_flight: None,
            results_tx,
            results_rx,
            surface,
            table: BackendTable::empty(),
            fetches: 0,
            restarts: 0,
        }
    }

    /// Arm the repeating timer. The first tick fires one `period` from now.
    ///
    /// Any previously armed timer is replaced, so at most one is ever active.
    pub fn schedule(&mut self, period: Duration) {
        let period = period.max(Duration::from_millis(1));
        let mut timer = time::interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.timer = Some(timer);

        tracing::debug!(interval_ms = period.as_millis() as u64, "Poll timer armed");
    }

    /// Full resynchronization: clear the gate, fetch now, re-arm the timer.
    pub fn restart(&mut self) {
        self.timer = None;
        self.gate.reset();
        self.restarts += 1;

        tracing::info!(restarts = self.restarts, "Restarting backend polling");

        self.dispatch_fetch();
        self.schedule(self.interval);
    }

    /// Disarm the timer and abandon any in-flight fetch.
    pub fn stop(&mut self) {
        self.timer = None;
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.task.abort();
        }
        tracing::info!("Backend polling stopped");
    }

    /// Wait for the next tick or fetch result.
    ///
    /// Pends forever when the timer is disarmed and nothing is in flight.
    /// Cancel safe, so it can sit in a `select!` next to other inputs.
    pub async fn next_event(&mut self) -> SessionEvent {
        tokio::select! {
            biased;
            Some((generation, result)) = self.results_rx.recv() => SessionEvent::Fetched { generation, result },
            _ = next_tick(&mut self.timer) => SessionEvent::Tick,
        }
    }

    /// Apply one event returned by [`next_event`](Self::next_event).
    pub fn handle(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Tick => self.on_tick(),
            SessionEvent::Fetched { generation, result } => self.on_fetched(generation, result),
        }
    }

    fn on_tick(&mut self) {
        if self.gate.is_tripped() {
            self.timer = None;
            tracing::info!("Fetching data failed, stopping fetch interval");
            return;
        }

        if !self.visible {
            tracing::trace!("Surface hidden, skipping poll");
            return;
        }

        self.dispatch_fetch();
    }

    fn dispatch_fetch(&mut self) {
        if let Some(previous) = self.in_flight.take() {
            previous.task.abort();
            tracing::debug!(generation = previous.generation, "Superseding in-flight fetch");
        }

        self.generation += 1;
        self.fetches += 1;

        let generation = self.generation;
        let api = self.api.clone();
        let results = self.results_tx.clone();

        let task = tokio::spawn(async move {
            let result = fetcher::fetch(&api).await;
            let _ = results.send((generation, result));
        });

        self.in_flight = Some(InFlight { generation, task });
    }

    fn on_fetched(&mut self, generation: u64, result: FetchResult) {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "Discarding stale fetch result");
            metrics::record_stale_result();
            return;
        }
        self.in_flight = None;

        let rendered = result.and_then(|doc| render(doc.as_ref()).map_err(ReadError::from));

        match rendered {
            Ok(table) => {
                tracing::debug!(rows = table.len(), "Backend table updated");
                self.table = table;
                self.surface.show_table(&self.table);
            }
            Err(e) => {
                if e.clears_table() {
                    self.table = BackendTable::empty();
                    self.surface.show_table(&self.table);
                }
                self.report_failure(&e);
            }
        }
    }

    fn report_failure(&mut self, error: &ReadError) {
        tracing::warn!(kind = error.kind(), error = %error, "Read path failure");
        if self
            .gate
            .report_failure(&error.reason(), &mut self.timer, self.surface.as_mut())
        {
            metrics::record_gate_trip(error.kind());
        }
    }

    /// Current lifecycle state, derived from the timer and the gate.
    pub fn state(&self) -> SessionState {
        if self.gate.is_tripped() {
            SessionState::Failed
        } else if self.timer.is_some() {
            SessionState::Running
        } else {
            SessionState::Stopped
        }
    }

    /// Hidden surfaces skip ticks. Becoming visible waits for the next tick.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            tracing::info!(visible, "Surface visibility changed");
        }
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the repeating poll timer is scheduled.
    pub fn is_timer_armed(&self) -> bool {
        self.timer.is_some()
    }

    /// Whether a fetch task is still running.
    pub fn has_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The table currently on display.
    pub fn table(&self) -> &BackendTable {
        &self.table
    }

    /// Fetches dispatched over the session lifetime.
    pub fn fetches(&self) -> u64 {
        self.fetches
    }

    /// Number of `restart()` calls, initial load included.
    pub fn restarts(&self) -> u64 {
        self.restarts
    }

    pub fn gate(&self) -> &FailureGate {
        &self.gate
    }

    /// The surface tables and alerts are written to.
    pub fn surface_mut(&mut self) -> &mut dyn OperatorSurface {
        self.surface.as_mut()
    }
}

impl<A> Drop for PollerSession<A> {
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.task.abort();
        }
    }
}

async fn next_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

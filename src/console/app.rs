//! The console event loop.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::client::mutation::{MutationClient, MutationOutcome};
use crate::client::transport::BackendApi;
use crate::console::command::{Command, CommandError, HELP};
use crate::console::form::{parse_port, AddBackendForm};
use crate::console::input::CommandLines;
use crate::error::MutationError;
use crate::lifecycle::ShutdownSignal;
use crate::model::BackendKey;
use crate::poller::PollerSession;
use crate::render::OperatorSurface;

/// Whether the loop should keep going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Operator console: one poller session, one mutation client, one form.
pub struct Console<A> {
    session: PollerSession<A>,
    mutations: MutationClient<A>,
    mutation_rx: mpsc::UnboundedReceiver<MutationOutcome>,
    form: AddBackendForm,
}

impl<A: BackendApi> Console<A> {
    /// Build a console around `api`. Call [`start`](Self::start) to load the table.
    pub fn new(api: A, surface: Box<dyn OperatorSurface>, interval: Duration) -> Self {
        let (mutations, mutation_rx) = MutationClient::new(api.clone());
        Self {
            session: PollerSession::new(api, surface, interval),
            mutations,
            mutation_rx,
            form: AddBackendForm::new(),
        }
    }

    /// Initial load: same entry point as a post-mutation resync.
    pub fn start(&mut self) {
        self.session.restart();
    }

    /// Run until `quit` or shutdown, executing lines from `input`.
    ///
    /// A closed `input` only stops command reading; polling continues until
    /// shutdown so the console also works with a closed stdin. Nothing here
    /// waits on the reader, so shutdown never blocks on a pending read.
    pub async fn run(&mut self, mut input: CommandLines, mut shutdown: ShutdownSignal) {
        let mut input_open = true;

        loop {
            tokio::select! {
                _ = shutdown.recv() => break,
                line = input.recv(), if input_open => match line {
                    Some(line) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        if self.execute_line(&line) == Flow::Quit {
                            break;
                        }
                    }
                    None => {
                        tracing::debug!("Command input closed, polling continues");
                        input_open = false;
                    }
                },
                _ = self.pump() => {}
            }
        }

        self.session.stop();
    }

    /// Process exactly one session event or mutation outcome.
    pub async fn pump(&mut self) {
        tokio::select! {
            biased;
            Some(outcome) = self.mutation_rx.recv() => self.on_mutation(outcome),
            event = self.session.next_event() => self.session.handle(event),
        }
    }

    /// Parse and execute one line of operator input.
    pub fn execute_line(&mut self, line: &str) -> Flow {
        match line.parse::<Command>() {
            Ok(command) => self.execute(command),
            Err(CommandError::Empty) => Flow::Continue,
            Err(e) => {
                self.notice(&e.to_string());
                Flow::Continue
            }
        }
    }

    /// Execute one parsed command.
    pub fn execute(&mut self, command: Command) -> Flow {
        match command {
            Command::Add { host, port } => {
                self.form.set_host(host);
                self.form.set_port(port);
                match self.form.submit(&self.mutations) {
                    Ok(key) => self.notice(&format!("adding {}", key)),
                    Err(e) => self.notice(&format!("add rejected: {}", e)),
                }
            }
            Command::DeleteRow(row) => {
                let target = self
                    .session
                    .table()
                    .delete_control(row)
                    .map(|control| control.target().clone());
                match target {
                    Some(key) => self.remove(key),
                    None => self.notice(&format!("no row {} in the current table", row)),
                }
            }
            Command::Delete { host, port } => match parse_port(&port) {
                Ok(port) => self.remove(BackendKey::new(host, port)),
                Err(e) => self.notice(&format!("delete rejected: {}", e)),
            },
            Command::Refresh => self.session.restart(),
            Command::Hide => self.session.set_visible(false),
            Command::Show => self.session.set_visible(true),
            Command::List => {
                let table = self.session.table().clone();
                self.session.surface_mut().show_table(&table);
            }
            Command::Status => {
                let status = format!(
                    "polling: {:?}, visible: {}, interval: {}ms, rows: {}, fetches: {}, gate trips: {}",
                    self.session.state(),
                    self.session.is_visible(),
                    self.session.interval().as_millis(),
                    self.session.table().len(),
                    self.session.fetches(),
                    self.session.gate().trips(),
                );
                self.notice(&status);
            }
            Command::Help => self.notice(HELP),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn remove(&mut self, key: BackendKey) {
        self.notice(&format!("deleting {}", key));
        self.mutations.remove(key);
    }

    /// Accepted changes force a full resync; failures are only logged.
    pub fn on_mutation(&mut self, outcome: MutationOutcome) {
        match &outcome.result {
            Ok(()) => {
                tracing::info!(kind = %outcome.kind, backend = %outcome.key, "Backend change applied");
                self.session.restart();
            }
            Err(MutationError::Transport(e)) => {
                tracing::warn!(kind = %outcome.kind, backend = %outcome.key, error = %e, "Backend change request error");
            }
            Err(MutationError::Rejected { status, body }) => {
                tracing::warn!(
                    kind = %outcome.kind,
                    backend = %outcome.key,
                    status,
                    body = %body,
                    "Backend change rejected by server"
                );
            }
        }
    }

    fn notice(&mut self, message: &str) {
        self.session.surface_mut().notice(message);
    }

    pub fn session(&self) -> &PollerSession<A> {
        &self.session
    }

    pub fn form(&self) -> &AddBackendForm {
        &self.form
    }
}

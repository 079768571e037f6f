//! Operator command input.

use std::io::{BufRead, BufReader, Read};
use std::thread;

use tokio::sync::mpsc;

/// Lines typed by the operator. The channel closes at end of input.
pub type CommandLines = mpsc::UnboundedReceiver<String>;

/// Read lines from `reader` on a dedicated OS thread.
///
/// A blocking read on stdin cannot be cancelled, so it must not run on the
/// tokio blocking pool: the runtime would wait for it at exit. The thread is
/// detached and dies with the process.
pub fn spawn_line_reader<R>(reader: R) -> CommandLines
where
    R: Read + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();

    let spawned = thread::Builder::new()
        .name("console-input".into())
        .spawn(move || {
            for line in BufReader::new(reader).lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to read command input");
                        break;
                    }
                }
            }
        });

    if let Err(e) = spawned {
        // Dropping the sender reads as end of input; polling still runs.
        tracing::error!(error = %e, "Unable to start command input thread");
    }

    rx
}

//! Operator console: the textual shutdown command on standard input.
//!
//! Input is read on a dedicated OS thread and forwarded over a channel. A
//! blocking stdin read cannot be cancelled, so the reader thread is detached
//! and never joined; the runtime can shut down while it is still blocked.

use std::io::BufRead;
use std::thread;

use tokio::sync::mpsc;

/// The operator command that triggers shutdown.
pub const STOP_COMMAND: &str = "stop";

/// True when `line` is the stop command (case-insensitive, whitespace-trimmed).
pub fn is_stop_command(line: &str) -> bool {
    line.trim().to_lowercase() == STOP_COMMAND
}

/// Line receiver over the operator's input channel.
pub struct OperatorConsole {
    lines: mpsc::UnboundedReceiver<String>,
}

impl OperatorConsole {
    /// Console reading the process's standard input.
    pub fn stdin() -> Self {
        Self::from_reader(std::io::BufReader::new(std::io::stdin()))
    }

    /// Console fed by a detached thread reading lines from `input`.
    pub fn from_reader<R>(input: R) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let spawned = thread::Builder::new()
            .name("operator-console".into())
            .spawn(move || forward_lines(input, tx));
        if let Err(e) = spawned {
            // The sender went down with the closure, so the console reads as closed.
            tracing::error!(error = %e, "Failed to start operator console reader");
        }
        Self::new(rx)
    }

    pub fn new(lines: mpsc::UnboundedReceiver<String>) -> Self {
        Self { lines }
    }

    /// Receive lines until the stop command arrives.
    ///
    /// Returns `true` on the stop command and `false` once the input is
    /// exhausted or unreadable; every other line is ignored. Cancel-safe.
    pub async fn wait_for_stop(&mut self) -> bool {
        while let Some(line) = self.lines.recv().await {
            if is_stop_command(&line) {
                return true;
            }
            tracing::debug!(input = %line.trim(), "Ignoring operator input");
        }
        tracing::info!("Operator input closed");
        false
    }
}

fn forward_lines<R: BufRead>(input: R, tx: mpsc::UnboundedSender<String>) {
    for line in input.lines() {
        match line {
            Ok(line) => {
                if tx.send(line).is_err() {
                    return;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Operator input unreadable");
                return;
            }
        }
    }
}

//! Line input for the classroom driver.

use std::collections::VecDeque;
use std::io::BufRead;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Source of typed lines.
#[async_trait::async_trait]
pub trait LineInput: Send {
    /// Waits for the next line. `None` once input has ended.
    async fn next_line(&mut self) -> Option<String>;
}

/// Lines read from stdin on a background thread.
pub struct StdinInput {
    lines_rx: mpsc::UnboundedReceiver<String>,
}

impl StdinInput {
    /// Starts the reader thread.
    ///
    /// A blocking read cannot be cancelled, so the reader lives on a plain
    /// thread that does not hold the runtime open at exit.
    pub fn spawn() -> Self {
        let (lines_tx, lines_rx) = mpsc::unbounded_channel();
        std::thread::spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if lines_tx.send(line).is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to read stdin");
                        return;
                    }
                }
            }
            debug!("Stdin closed");
        });
        Self { lines_rx }
    }
}

#[async_trait::async_trait]
impl LineInput for StdinInput {
    async fn next_line(&mut self) -> Option<String> {
        self.lines_rx.recv().await
    }
}

/// Fixed lines, for scripted sessions.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    /// Creates input that yields `lines` in order, then ends.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait::async_trait]
impl LineInput for ScriptedInput {
    async fn next_line(&mut self) -> Option<String> {
        self.lines.pop_front()
    }
}

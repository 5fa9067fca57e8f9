//! Line transport from the engine's stdout to the consuming session.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::ChildStdout;
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::{Error, Result};

/// Start the background reader task for an engine's stdout.
///
/// The task reads the stream line by line, trims each line, skips empties,
/// and publishes the rest into the returned channel in emission order. It
/// stops only when the stream closes (engine exited or pipe broken) or when
/// the receiving [`OutputBuffer`] has been dropped.
pub(crate) fn spawn_reader(stdout: ChildStdout) -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut lines = BufReader::new(stdout).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    tracing::trace!(line = line, "<- engine");
                    if tx.send(line.to_owned()).is_err() {
                        // Receiver dropped; the session is gone.
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::debug!(error = %e, "engine stdout read failed");
                    break;
                }
            }
        }
    });

    rx
}

/// An ordered, growable buffer of engine output lines.
///
/// Fed by the reader task's channel and owned exclusively by its session,
/// the single consumer. Lines come out in exactly the order the engine
/// emitted them.
///
/// Both reads wait with a deadline: [`take`](Self::take) for the buffer to
/// become non-empty, [`peek`](Self::peek) for it to hold at least `i + 1`
/// entries. The wait is a blocking channel receive bounded by the deadline,
/// not a sleep-and-poll loop, so a line arriving mid-wait is observed
/// immediately. On expiry the call fails with [`Error::Timeout`]; if the
/// channel closed because the engine died, with [`Error::EngineTerminated`].
pub struct OutputBuffer {
    rx: mpsc::UnboundedReceiver<String>,
    lines: VecDeque<String>,
}

impl OutputBuffer {
    pub(crate) fn new(rx: mpsc::UnboundedReceiver<String>) -> Self {
        Self {
            rx,
            lines: VecDeque::new(),
        }
    }

    /// Move every line currently sitting in the channel into the buffer.
    /// Cheap and non-blocking; also salvages lines buffered in the channel
    /// after the reader has already stopped.
    fn drain(&mut self) {
        while let Ok(line) = self.rx.try_recv() {
            self.lines.push_back(line);
        }
    }

    /// Number of lines currently buffered (after draining the channel).
    pub fn len(&mut self) -> usize {
        self.drain();
        self.lines.len()
    }

    /// Whether the buffer is currently empty (after draining the channel).
    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    /// Pop and return the oldest buffered line, waiting up to `timeout` for
    /// one to arrive.
    pub async fn take(&mut self, timeout: Duration) -> Result<String> {
        let deadline = Instant::now() + timeout;
        self.drain();
        while self.lines.is_empty() {
            self.recv_until(deadline, timeout).await?;
        }
        Ok(self.lines.pop_front().expect("buffer is non-empty"))
    }

    /// Return the line at `index` without removing it, waiting up to
    /// `timeout` for the buffer to hold at least `index + 1` lines.
    pub async fn peek(&mut self, index: usize, timeout: Duration) -> Result<&str> {
        let deadline = Instant::now() + timeout;
        self.drain();
        while self.lines.len() <= index {
            self.recv_until(deadline, timeout).await?;
        }
        Ok(self.lines[index].as_str())
    }

    async fn recv_until(&mut self, deadline: Instant, timeout: Duration) -> Result<()> {
        match tokio::time::timeout_at(deadline, self.rx.recv()).await {
            Err(_) => Err(Error::Timeout(timeout)),
            Ok(None) => Err(Error::EngineTerminated),
            Ok(Some(line)) => {
                self.lines.push_back(line);
                self.drain();
                Ok(())
            }
        }
    }
}

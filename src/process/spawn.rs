//! Engine process spawning and lifecycle management.

use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

use crate::config::EngineConfig;
use crate::{Error, Result};

/// A running engine process.
///
/// One process lives for the whole session. Commands are written to its
/// stdin one line at a time and flushed immediately; stdout is handed to the
/// session's reader task once via [`take_stdout`](Self::take_stdout).
///
/// # Shutdown
///
/// The owning session must call [`shutdown`](Self::shutdown) on every exit
/// path; it sends `quit` and waits for the process, bounded by a timeout.
/// Dropping an `EngineProcess` only kills the subprocess as a backstop;
/// teardown timing must never depend on drop order.
pub struct EngineProcess {
    child: Child,
    stdin: ChildStdin,
    stdout: Option<ChildStdout>,
}

impl EngineProcess {
    /// Spawn the engine binary described by `config`.
    ///
    /// The binary path was validated at config build time; a racing deletion
    /// still maps to [`Error::EngineNotFound`] here.
    pub async fn spawn(config: &EngineConfig) -> Result<Self> {
        let mut cmd = Command::new(config.binary_path());
        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::null());

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::EngineNotFound {
                    path: config.binary_path().display().to_string(),
                }
            } else {
                Error::ProcessSpawn(e)
            }
        })?;

        let stdin = child.stdin.take().expect("stdin was configured");
        let stdout = child.stdout.take().expect("stdout was configured");

        Ok(Self {
            child,
            stdin,
            stdout: Some(stdout),
        })
    }

    /// Write a single command line to the engine's stdin and flush it.
    ///
    /// The line becomes visible to the engine immediately. A broken pipe
    /// means the engine went away and maps to [`Error::EngineTerminated`].
    pub async fn send_line(&mut self, line: &str) -> Result<()> {
        tracing::debug!(command = line, "-> engine");
        self.write(line.as_bytes()).await?;
        self.write(b"\n").await?;
        self.stdin.flush().await.map_err(map_pipe_error)
    }

    async fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.stdin.write_all(bytes).await.map_err(map_pipe_error)
    }

    /// Take the engine's stdout for the reader task. Can only be taken once.
    pub(crate) fn take_stdout(&mut self) -> Option<ChildStdout> {
        self.stdout.take()
    }

    /// Get the process ID of the running engine.
    pub fn pid(&self) -> Option<u32> {
        self.child.id()
    }

    /// Check if the process is still running.
    pub fn is_running(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    /// Wait for the process to exit and return its exit status.
    pub async fn wait(&mut self) -> Result<std::process::ExitStatus> {
        self.child.wait().await.map_err(Error::io)
    }

    /// Try to kill the process without waiting.
    pub fn start_kill(&mut self) -> Result<()> {
        self.child.start_kill().map_err(Error::io)
    }

    /// Shut the engine down.
    ///
    /// If the process is still running, send `quit` and wait for it to exit,
    /// bounded by `timeout`; a stuck engine is killed when the bound
    /// expires. If the process already exited this is a no-op.
    pub async fn shutdown(&mut self, timeout: Duration) -> Result<()> {
        if !self.is_running() {
            return Ok(());
        }

        // A broken pipe here just means the engine is already on its way out.
        match self.send_line("quit").await {
            Ok(()) | Err(Error::EngineTerminated) => {}
            Err(e) => return Err(e),
        }

        match tokio::time::timeout(timeout, self.child.wait()).await {
            Ok(status) => {
                status.map_err(Error::io)?;
                Ok(())
            }
            Err(_) => {
                tracing::warn!("engine did not exit after quit; killing");
                self.child.kill().await.map_err(Error::io)
            }
        }
    }
}

impl Drop for EngineProcess {
    fn drop(&mut self) {
        // Backstop only; sessions shut down explicitly via shutdown().
        let _ = self.child.start_kill();
    }
}

fn map_pipe_error(e: std::io::Error) -> Error {
    if e.kind() == std::io::ErrorKind::BrokenPipe {
        Error::EngineTerminated
    } else {
        Error::Io(e)
    }
}

//! Protocol session: handshake, option discovery, and generic line I/O.
//!
//! [`EngineSession`] owns the engine process, its reader task and the output
//! buffer, and layers the first slice of UCI on top: the `uci` → option
//! declarations → `uciok` handshake, plus the `put`/`take`/`peek` primitives
//! every higher-level command is built from.
//!
//! # Example
//!
//! ```ignore
//! use libuci::{EngineConfig, EngineSession};
//!
//! let config = EngineConfig::builder("/usr/bin/stockfish").build()?;
//! let mut session = EngineSession::open(&config).await?;
//! println!("engine declares {} options", session.options().len());
//! session.is_ready().await?;
//! session.close().await?;
//! ```

use std::collections::HashMap;
use std::time::Duration;

use crate::config::EngineConfig;
use crate::process::{spawn_reader, EngineProcess, OutputBuffer};
use crate::protocol::EngineOption;
use crate::Result;

/// A live protocol session with a UCI engine.
///
/// Construction spawns the process, starts the reader task and completes
/// the handshake, so a successfully opened session has already proven the
/// engine speaks the protocol. The session is the buffer's only consumer;
/// it must not be driven from more than one task at a time.
///
/// # Shutdown
///
/// Call [`close`](Self::close) on every exit path. It sends `quit` and
/// waits for the process (bounded by the session timeout); if the process
/// already exited it is a no-op. Dropping the session only kills the
/// subprocess as a backstop.
pub struct EngineSession {
    process: EngineProcess,
    buffer: OutputBuffer,
    timeout: Duration,
    /// Declared options, keyed by name. Populated once, during the
    /// handshake, and never mutated afterwards.
    options: HashMap<String, EngineOption>,
}

impl EngineSession {
    /// Spawn the engine described by `config` and perform the handshake.
    pub async fn open(config: &EngineConfig) -> Result<Self> {
        let mut process = EngineProcess::spawn(config).await?;
        let stdout = process.take_stdout().expect("stdout not yet taken");
        let buffer = OutputBuffer::new(spawn_reader(stdout));

        let mut session = Self {
            process,
            buffer,
            timeout: config.timeout(),
            options: HashMap::new(),
        };
        session.handshake().await?;
        Ok(session)
    }

    /// Send `uci` and record option declarations until `uciok` arrives.
    /// Lines that are not declarations (`id` banners and other chatter) are
    /// silently ignored.
    async fn handshake(&mut self) -> Result<()> {
        self.put("uci").await?;

        let mut options = HashMap::new();
        loop {
            let line = self.take().await?;
            if line == "uciok" {
                break;
            }
            if let Some(option) = EngineOption::parse(&line) {
                options.insert(option.name.clone(), option);
            }
        }

        tracing::debug!(options = options.len(), "handshake complete");
        self.options = options;
        Ok(())
    }

    /// The options the engine declared during the handshake, keyed by name.
    pub fn options(&self) -> &HashMap<String, EngineOption> {
        &self.options
    }

    /// Whether the engine declared an option with this exact name.
    pub fn supports_option(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    /// The per-wait timeout this session was configured with.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send a single command line to the engine.
    pub async fn put(&mut self, line: &str) -> Result<()> {
        self.process.send_line(line).await
    }

    /// Destructively read the next buffered output line, waiting up to the
    /// session timeout for one to arrive.
    pub async fn take(&mut self) -> Result<String> {
        let line = self.buffer.take(self.timeout).await?;
        tracing::debug!(line = line.as_str(), "<- engine");
        Ok(line)
    }

    /// Read the buffered output line at `index` without consuming it,
    /// waiting up to the session timeout for enough lines to arrive.
    pub async fn peek(&mut self, index: usize) -> Result<String> {
        let line = self.buffer.peek(index, self.timeout).await?;
        Ok(line.to_owned())
    }

    /// Send `isready` and discard output until `readyok` is seen.
    pub async fn is_ready(&mut self) -> Result<()> {
        self.put("isready").await?;
        loop {
            if self.take().await? == "readyok" {
                return Ok(());
            }
        }
    }

    /// Ask the engine to curtail the current search.
    ///
    /// Does not wait for acknowledgment: search output keeps flowing until
    /// the engine reports its `bestmove`, which the caller still drains.
    pub async fn stop(&mut self) -> Result<()> {
        self.put("stop").await
    }

    /// Whether the engine process is still running.
    pub fn is_running(&mut self) -> bool {
        self.process.is_running()
    }

    /// Shut the session down: send `quit` and wait for the process to exit,
    /// bounded by the session timeout. No-op if the process already exited.
    pub async fn close(&mut self) -> Result<()> {
        self.process.shutdown(self.timeout).await
    }
}

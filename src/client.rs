//! High-level UCI engine client.
//!
//! This module provides [`UciEngine`], the main entry point for driving an
//! engine: position setup, option setting, and search invocation.
//!
//! # Example
//!
//! ```ignore
//! use libuci::{EngineConfig, GoParams, UciEngine, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = EngineConfig::builder("/usr/bin/stockfish")
//!         .option("Hash", "256")
//!         .build()?;
//!     let mut engine = UciEngine::launch(config).await?;
//!
//!     engine.set_position(None, &["e2e4", "e7e5"]).await?;
//!     let result = engine.go_and_collect(&GoParams::new().depth(18)).await?;
//!     println!("best move: {:?}", result.bestmove);
//!
//!     engine.close().await?;
//!     Ok(())
//! }
//! ```

use std::collections::HashMap;

use crate::config::EngineConfig;
use crate::protocol::EngineOption;
use crate::search::{GoParams, RawSearchStream, SearchSnapshot, SearchStream};
use crate::session::EngineSession;
use crate::{Error, Result};

/// A client driving one UCI engine process.
///
/// Construction performs the full startup sequence: spawn, handshake, and
/// the configured option overrides. The client tracks the engine's MultiPV
/// setting so that structured search snapshots group exactly as many lines
/// as the engine reports per depth.
///
/// # Shutdown
///
/// Call [`close`](Self::close) on every exit path, including error paths;
/// it sends `quit` and waits for the process to exit. Dropping the client
/// only kills the subprocess as a last resort.
pub struct UciEngine {
    session: EngineSession,
    multipv: u32,
}

impl UciEngine {
    /// Spawn the engine, perform the handshake, and apply the config's
    /// option overrides in order.
    pub async fn launch(config: EngineConfig) -> Result<Self> {
        let session = EngineSession::open(&config).await?;
        let mut engine = Self {
            session,
            multipv: 1,
        };

        for (name, value) in config.options() {
            // Route MultiPV through set_multi_pv so the tracked fan-out
            // count and the engine stay in agreement.
            if name.as_str() == "MultiPV" {
                if let Ok(count) = value.parse() {
                    engine.set_multi_pv(count).await?;
                    continue;
                }
            }
            engine.set_option(name, Some(value.as_str())).await?;
        }

        Ok(engine)
    }

    /// The options the engine declared during the handshake, keyed by name.
    pub fn available_options(&self) -> &HashMap<String, EngineOption> {
        self.session.options()
    }

    /// The MultiPV count the search parser currently groups by.
    pub fn multi_pv(&self) -> u32 {
        self.multipv
    }

    /// Direct access to the underlying session for protocol-level I/O.
    pub fn session_mut(&mut self) -> &mut EngineSession {
        &mut self.session
    }

    /// Send `isready` and wait for `readyok`.
    pub async fn is_ready(&mut self) -> Result<()> {
        self.session.is_ready().await
    }

    /// Set up a position.
    ///
    /// Always issues `ucinewgame` followed by an `isready` round trip first,
    /// so no prior search state leaks into the new position, then sends
    /// `position startpos` or `position fen <FEN>` with the given move list
    /// appended when non-empty.
    pub async fn set_position(&mut self, fen: Option<&str>, moves: &[&str]) -> Result<()> {
        self.session.put("ucinewgame").await?;
        self.session.is_ready().await?;
        self.session.put(&position_command(fen, moves)).await
    }

    /// Set an engine option.
    ///
    /// If the engine did not declare `name` during the handshake this is a
    /// warned no-op; unsupported options are tolerated, not fatal.
    pub async fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<()> {
        if !self.session.supports_option(name) {
            tracing::warn!(option = name, "engine does not support option");
            return Ok(());
        }
        let command = match value {
            Some(value) => format!("setoption name {name} value {value}"),
            None => format!("setoption name {name}"),
        };
        self.session.put(&command).await
    }

    /// Set the engine's MultiPV option and the client's tracked count.
    ///
    /// The tracked count only changes when the engine actually declares
    /// MultiPV; against an engine without it the call degrades to the same
    /// warned no-op as [`set_option`](Self::set_option).
    pub async fn set_multi_pv(&mut self, count: u32) -> Result<()> {
        let count = count.max(1);
        self.set_option("MultiPV", Some(&count.to_string())).await?;
        if self.session.supports_option("MultiPV") {
            self.multipv = count;
        }
        Ok(())
    }

    /// Start a search and stream parsed snapshots, one per depth report.
    pub async fn go(&mut self, params: &GoParams) -> Result<SearchStream<'_>> {
        let multipv = self.multipv;
        self.session.put(&params.to_command()).await?;
        Ok(SearchStream::new(&mut self.session, multipv))
    }

    /// Start a search and stream its raw output lines, unparsed, up to and
    /// including the `bestmove` line.
    pub async fn go_raw(&mut self, params: &GoParams) -> Result<RawSearchStream<'_>> {
        self.session.put(&params.to_command()).await?;
        Ok(RawSearchStream::new(&mut self.session))
    }

    /// Run a search to completion and return the terminal snapshot.
    pub async fn go_and_collect(&mut self, params: &GoParams) -> Result<SearchSnapshot> {
        let mut stream = self.go(params).await?;
        loop {
            match stream.next().await {
                Some(Ok(snapshot)) if snapshot.is_terminal() => return Ok(snapshot),
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e),
                None => return Err(Error::EngineTerminated),
            }
        }
    }

    /// Ask the engine to curtail the current search.
    pub async fn stop(&mut self) -> Result<()> {
        self.session.stop().await
    }

    /// Shut the engine down: `quit`, then wait for the process to exit.
    pub async fn close(&mut self) -> Result<()> {
        self.session.close().await
    }
}

fn position_command(fen: Option<&str>, moves: &[&str]) -> String {
    let mut command = String::from("position ");
    match fen {
        Some(fen) => {
            command.push_str("fen ");
            command.push_str(fen);
        }
        None => command.push_str("startpos"),
    }
    if !moves.is_empty() {
        command.push_str(" moves");
        for m in moves {
            command.push(' ');
            command.push_str(m);
        }
    }
    command
}

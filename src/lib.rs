//! # libuci
//!
//! Async Rust driver for UCI chess engines.
//!
//! This library spawns an engine binary (Stockfish, Lc0, anything speaking
//! the Universal Chess Interface), performs the capability handshake, and
//! turns the engine's asynchronous output stream into structured search
//! snapshots and a final best move:
//! - One background reader task per engine, feeding an ordered,
//!   timeout-bounded output buffer
//! - Handshake with option discovery (`uci` → declarations → `uciok`)
//! - Position setup, option setting, and `go` search invocation
//! - A MultiPV-aware parser that groups `info` lines into snapshots
//!
//! ## Quick Start
//!
//! ```ignore
//! use libuci::{EngineConfig, GoParams, UciEngine, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = EngineConfig::builder("/usr/bin/stockfish").build()?;
//!     let mut engine = UciEngine::launch(config).await?;
//!
//!     engine.set_position(None, &["e2e4"]).await?;
//!     let result = engine.go_and_collect(&GoParams::new().depth(15)).await?;
//!     println!("best reply: {:?}", result.bestmove);
//!
//!     engine.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Streaming a search
//!
//! ```ignore
//! let mut search = engine.go(&GoParams::new().movetime(5_000)).await?;
//! while let Some(snapshot) = search.next().await {
//!     let snapshot = snapshot?;
//!     println!("{:?} {:?}", snapshot.score(), snapshot.next_move());
//! }
//! ```
//!
//! ## MultiPV analysis
//!
//! ```ignore
//! engine.set_multi_pv(3).await?;
//! let result = engine.go_and_collect(&GoParams::new().depth(20)).await?;
//! for line in &result.lines {
//!     println!("{:?}: {:?}", line.score, line.moves);
//! }
//! ```
//!
//! ## Shutdown
//!
//! Engines are real child processes: call [`UciEngine::close`] on every
//! exit path. It sends `quit` and waits for the process; dropping the
//! client only kills the subprocess as a backstop.

mod client;
pub mod config;
mod error;
pub mod process;
pub mod protocol;
pub mod search;
mod session;

pub use error::{Error, Result};

// Re-export the main client types at crate root
pub use client::UciEngine;
pub use session::EngineSession;

// Re-export commonly used config types at crate root
pub use config::{EngineConfig, EngineConfigBuilder};

// Re-export commonly used protocol types at crate root
pub use protocol::{BestMove, EngineOption, Score, SearchInfo};

// Re-export commonly used search types at crate root
pub use search::{GoParams, RawSearchStream, SearchSnapshot, SearchStream};

// Re-export commonly used process types at crate root
pub use process::{EngineProcess, OutputBuffer};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}
    fn assert_send<T: Send>() {}

    /// All major public types must be Send + Sync for use across async tasks.
    #[test]
    fn public_types_are_send_sync() {
        // Main client types
        assert_send_sync::<UciEngine>();
        assert_send_sync::<EngineSession>();

        // Configuration types
        assert_send_sync::<EngineConfig>();
        assert_send_sync::<EngineConfigBuilder>();

        // Protocol types
        assert_send_sync::<BestMove>();
        assert_send_sync::<EngineOption>();
        assert_send_sync::<Score>();
        assert_send_sync::<SearchInfo>();

        // Search types
        assert_send_sync::<GoParams>();
        assert_send_sync::<SearchSnapshot>();

        // Process types
        assert_send_sync::<EngineProcess>();
        assert_send_sync::<OutputBuffer>();

        // Error type
        assert_send_sync::<Error>();
    }

    /// The search streams borrow the session mutably; they are Send but
    /// have no reason to be Sync.
    #[test]
    fn search_streams_are_send() {
        assert_send::<SearchStream<'static>>();
        assert_send::<RawSearchStream<'static>>();
    }
}

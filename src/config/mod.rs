//! Configuration for launching a UCI engine.
//!
//! This module provides [`EngineConfig`] and [`EngineConfigBuilder`] for
//! describing which engine binary to run, how long each wait on engine
//! output may block, and which engine options to apply right after the
//! handshake.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use libuci::EngineConfig;
//!
//! let config = EngineConfig::builder("/usr/bin/stockfish")
//!     .timeout(Duration::from_secs(10))
//!     .option("Hash", "256")
//!     .option("Threads", "4")
//!     .build()?;
//! ```

mod builder;

pub use builder::{EngineConfig, EngineConfigBuilder, DEFAULT_TIMEOUT};

//! Engine configuration and builder.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{Error, Result};

/// Default bound for each blocking wait on engine output.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for a UCI engine session.
///
/// Use [`EngineConfig::builder()`] to create a new configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub(crate) binary_path: PathBuf,
    pub(crate) timeout: Duration,
    /// Option overrides applied immediately after the handshake, in order.
    pub(crate) options: Vec<(String, String)>,
}

impl EngineConfig {
    /// Create a builder for the engine binary at `path`.
    pub fn builder(path: impl Into<PathBuf>) -> EngineConfigBuilder {
        EngineConfigBuilder {
            binary_path: path.into(),
            timeout: DEFAULT_TIMEOUT,
            options: Vec::new(),
        }
    }

    /// Path to the engine binary.
    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    /// The per-wait timeout bounding each `take`/`peek` call.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Option overrides applied after the handshake, in insertion order.
    pub fn options(&self) -> &[(String, String)] {
        &self.options
    }
}

/// Builder for [`EngineConfig`].
///
/// `build()` validates that the binary path references an existing file and
/// that the timeout is non-zero; both failures are fatal configuration
/// errors raised before any process is spawned.
#[derive(Debug, Clone)]
pub struct EngineConfigBuilder {
    binary_path: PathBuf,
    timeout: Duration,
    options: Vec<(String, String)>,
}

impl EngineConfigBuilder {
    /// Bound for each blocking wait on engine output (default: 60 s).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add an engine option override, applied right after the handshake.
    ///
    /// Overrides are applied in the order they are added. Option names must
    /// match the engine's declared options; unsupported names are warned
    /// about and skipped at launch time, not here.
    pub fn option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.push((name.into(), value.into()));
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<EngineConfig> {
        if !self.binary_path.is_file() {
            return Err(Error::EngineNotFound {
                path: self.binary_path.display().to_string(),
            });
        }

        if self.timeout.is_zero() {
            return Err(Error::InvalidConfig("timeout must be non-zero".into()));
        }

        Ok(EngineConfig {
            binary_path: self.binary_path,
            timeout: self.timeout,
            options: self.options,
        })
    }
}

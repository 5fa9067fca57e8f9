use std::time::Duration;

/// Errors that can occur when driving a UCI engine.
///
/// Errors are organized by category:
/// - Configuration errors: detected at `build()` time, before any process exists
/// - Spawn errors: failed to start the engine process
/// - IO errors: communication failures with the subprocess
/// - Runtime errors: failures while waiting on engine output
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    // -------------------------------------------------------------------------
    // Configuration errors (detected at build() time)
    // -------------------------------------------------------------------------
    /// The configured engine binary does not reference an existing file.
    #[error("engine binary not found at {path}")]
    EngineNotFound { path: String },

    /// Invalid configuration provided to the builder.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // -------------------------------------------------------------------------
    // Spawn errors
    // -------------------------------------------------------------------------
    /// Failed to spawn the engine subprocess.
    #[error("failed to spawn engine process: {0}")]
    ProcessSpawn(#[source] std::io::Error),

    // -------------------------------------------------------------------------
    // IO errors
    // -------------------------------------------------------------------------
    /// IO error communicating with the engine subprocess.
    #[error("IO error: {0}")]
    Io(#[source] std::io::Error),

    // -------------------------------------------------------------------------
    // Runtime errors
    // -------------------------------------------------------------------------
    /// A wait on engine output exceeded the configured timeout.
    ///
    /// The timeout applies per individual `take`/`peek` call, not to a whole
    /// search: a long search keeps the clock resetting as lines arrive.
    #[error("timed out after {0:?} waiting for engine output")]
    Timeout(Duration),

    /// The engine process terminated: its output stream reached end-of-file
    /// or its input pipe broke while the session was still in use.
    #[error("engine process terminated")]
    EngineTerminated,
}

/// A specialized Result type for libuci operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an IO error.
    pub fn io(source: std::io::Error) -> Self {
        Self::Io(source)
    }

    /// Check if this error is retryable.
    ///
    /// A timed-out wait may be retried (the engine may simply be thinking);
    /// transient IO failures may resolve. Configuration and termination
    /// errors are final.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Timeout(_) | Error::Io(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

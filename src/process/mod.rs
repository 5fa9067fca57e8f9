//! Process management for the engine subprocess.
//!
//! This module handles spawning the engine binary and moving lines across
//! the process boundary. One engine process lives for the whole session;
//! commands go down its stdin, and a dedicated reader task pumps its stdout
//! into an ordered buffer the session consumes.
//!
//! # Architecture
//!
//! ```text
//! libuci                                  engine
//! ┌───────────────┐                      ┌────────────┐
//! │ EngineProcess │──stdin (commands)───▶│            │
//! │               │                      │            │
//! │ reader task ──│◀─stdout (lines)──────│            │
//! │   └▶ channel ─▶ OutputBuffer         └────────────┘
//! └───────────────┘
//! ```
//!
//! The reader task is the only code that touches the engine's stdout. It
//! runs until the stream closes and is never cancelled from outside. The
//! channel hand-off is the only point of cross-task concurrency; everything
//! downstream of [`OutputBuffer`] is single-consumer.

mod io;
mod spawn;

pub(crate) use io::spawn_reader;
pub use io::OutputBuffer;
pub use spawn::EngineProcess;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_are_send() {
        fn assert_send<T: Send>() {}
        assert_send::<EngineProcess>();
        assert_send::<OutputBuffer>();
    }
}

//! Search invocation and its output streams.
//!
//! A search starts with a `go` command built from [`GoParams`] and produces
//! an asynchronous sequence of reports:
//!
//! - [`SearchStream`] (the default) groups and parses `info` lines into one
//!   [`SearchSnapshot`] per completed depth report, ending with the terminal
//!   snapshot that carries the engine's `bestmove`.
//! - [`RawSearchStream`] passes unparsed lines through untouched, ending
//!   inclusively with the `bestmove` line.
//!
//! Both streams are lazy: each step performs exactly the buffered reads it
//! needs, bounded by the session timeout. Cancellation is cooperative:
//! calling `stop()` asks the engine to wrap up, and the stream is drained
//! to its terminal element as usual.

mod params;
mod stream;

pub use params::GoParams;
pub use stream::{RawSearchStream, SearchSnapshot, SearchStream};

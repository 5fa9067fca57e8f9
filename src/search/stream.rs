//! Lazy streams over a running search's output.

use serde::{Deserialize, Serialize};

use crate::protocol::{BestMove, Score, SearchInfo};
use crate::session::EngineSession;
use crate::Result;

/// One reporting cycle of a running search.
///
/// A snapshot holds one parsed [`SearchInfo`] per configured MultiPV line,
/// ordered as the engine reported them; [`next_move`](Self::next_move) and
/// [`score`](Self::score) come from the first (primary) line. The final
/// snapshot of a search additionally carries the engine's `bestmove` and
/// optional `ponder` move; a snapshot is terminal if and only if it has a
/// bestmove.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSnapshot {
    /// One entry per principal variation, in report order.
    pub lines: Vec<SearchInfo>,
    /// The engine's final move choice; set only on the terminal snapshot.
    pub bestmove: Option<String>,
    /// The engine's suggested ponder move, if it offered one.
    pub ponder: Option<String>,
}

impl SearchSnapshot {
    /// The primary (first) variation of this cycle.
    pub fn primary(&self) -> Option<&SearchInfo> {
        self.lines.first()
    }

    /// The first move of the primary variation.
    pub fn next_move(&self) -> Option<&str> {
        self.primary().and_then(SearchInfo::next_move)
    }

    /// The primary variation's score.
    pub fn score(&self) -> Option<Score> {
        self.primary().map(|info| info.score)
    }

    /// Whether this is the search's final snapshot.
    pub fn is_terminal(&self) -> bool {
        self.bestmove.is_some()
    }
}

/// A lazy sequence of parsed [`SearchSnapshot`]s from a running search.
///
/// Each call to [`next`](Self::next) reads exactly one reporting cycle:
/// buffered lines are consumed (skipping non-info chatter) until one
/// `SearchInfo` per configured MultiPV line has accumulated, then the next
/// buffered line is peeked to see whether the search just finished. The
/// stream yields `None` after the terminal snapshot.
///
/// # Cancellation
///
/// Cancellation is cooperative: [`stop`](Self::stop) asks the engine to
/// wrap up, after which the engine still reports a final `bestmove`; keep
/// calling `next` until the terminal snapshot arrives.
pub struct SearchStream<'a> {
    session: &'a mut EngineSession,
    multipv: usize,
    done: bool,
}

impl<'a> SearchStream<'a> {
    pub(crate) fn new(session: &'a mut EngineSession, multipv: u32) -> Self {
        Self {
            session,
            multipv: multipv.max(1) as usize,
            done: false,
        }
    }

    /// The next snapshot, or `None` once the terminal snapshot has been
    /// yielded. Errors (timeout, engine death) also end the stream.
    pub async fn next(&mut self) -> Option<Result<SearchSnapshot>> {
        if self.done {
            return None;
        }
        match self.advance().await {
            Ok(snapshot) => {
                if snapshot.is_terminal() {
                    self.done = true;
                }
                Some(Ok(snapshot))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }

    async fn advance(&mut self) -> Result<SearchSnapshot> {
        let mut lines = Vec::with_capacity(self.multipv);
        while lines.len() < self.multipv {
            let raw = self.session.take().await?;
            if let Some(info) = SearchInfo::parse(&raw) {
                lines.push(info);
            }
            // anything else is chatter between reports; keep reading
        }

        let mut snapshot = SearchSnapshot {
            lines,
            bestmove: None,
            ponder: None,
        };

        if self.session.peek(0).await?.contains("bestmove") {
            let raw = self.session.take().await?;
            if let Some(best) = BestMove::parse(&raw) {
                snapshot.bestmove = Some(best.bestmove);
                snapshot.ponder = best.ponder;
            }
        }

        Ok(snapshot)
    }

    /// Ask the engine to curtail the search. The stream still runs until
    /// the engine's `bestmove` arrives.
    pub async fn stop(&mut self) -> Result<()> {
        self.session.stop().await
    }
}

/// A lazy passthrough of unparsed search output lines.
///
/// Each call to [`next`](Self::next) yields exactly one buffered line, with
/// no MultiPV grouping and no parsing. The line containing `bestmove` is
/// yielded too; after it the stream returns `None`.
pub struct RawSearchStream<'a> {
    session: &'a mut EngineSession,
    done: bool,
}

impl<'a> RawSearchStream<'a> {
    pub(crate) fn new(session: &'a mut EngineSession) -> Self {
        Self {
            session,
            done: false,
        }
    }

    /// The next raw line, or `None` once the `bestmove` line has been
    /// yielded.
    pub async fn next(&mut self) -> Option<Result<String>> {
        if self.done {
            return None;
        }
        match self.session.take().await {
            Ok(line) => {
                if line.contains("bestmove") {
                    self.done = true;
                }
                Some(Ok(line))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }

    /// Ask the engine to curtail the search. Lines keep flowing until the
    /// `bestmove` line arrives.
    pub async fn stop(&mut self) -> Result<()> {
        self.session.stop().await
    }
}

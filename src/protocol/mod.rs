//! UCI protocol data types and line parsers.
//!
//! Everything the engine says arrives as plain text lines. This module turns
//! the three line shapes the driver cares about into structured data:
//!
//! - `option name <NAME> type <TYPE> [default <VALUE>]` → [`EngineOption`]
//! - `info ... score (cp|mate) <v> ... pv <moves>` → [`SearchInfo`]
//! - `bestmove <move> [ponder <move>]` → [`BestMove`]
//!
//! Lines that fail to match a grammar are protocol noise (engine banners,
//! `info string` chatter, `currmove` telemetry without a pv) and are skipped
//! by the callers, never treated as errors.

mod bestmove;
mod info;
mod options;

pub use bestmove::BestMove;
pub use info::{Score, SearchInfo};
pub use options::EngineOption;

/// A cursor over the whitespace-separated tokens of a single line.
///
/// UCI fields like option names may span several tokens and are delimited by
/// the next keyword, so the cursor supports scanning forward to a keyword
/// while preserving the original spacing of the text before it.
pub(crate) struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(line: &'a str) -> Self {
        Tokens { rest: line }
    }

    /// The text before the first standalone occurrence of `keyword`, trimmed,
    /// with the cursor left sitting at the keyword itself. Returns `None`
    /// (cursor untouched) if the keyword does not occur.
    pub(crate) fn until_keyword(&mut self, keyword: &str) -> Option<&'a str> {
        let start = self.rest.trim_start();
        let mut cursor = start;
        loop {
            let trimmed = cursor.trim_start();
            if trimmed.is_empty() {
                return None;
            }
            let token_len = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
            if &trimmed[..token_len] == keyword {
                let before = start[..start.len() - trimmed.len()].trim_end();
                self.rest = trimmed;
                return Some(before);
            }
            cursor = &trimmed[token_len..];
        }
    }

    /// Everything left on the line, trimmed. Consumes the cursor.
    pub(crate) fn rest(&mut self) -> Option<&'a str> {
        let tail = self.rest.trim();
        self.rest = "";
        (!tail.is_empty()).then_some(tail)
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let trimmed = self.rest.trim_start();
        if trimmed.is_empty() {
            self.rest = trimmed;
            return None;
        }
        let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
        let (token, tail) = trimmed.split_at(end);
        self.rest = tail;
        Some(token)
    }
}

/// Whether `s` is a coordinate move token: file a–h, rank 1–8, file, rank,
/// plus an optional promotion piece.
pub(crate) fn is_move_token(s: &str) -> bool {
    let b = s.as_bytes();
    let square = |file: u8, rank: u8| (b'a'..=b'h').contains(&file) && (b'1'..=b'8').contains(&rank);
    match b.len() {
        4 => square(b[0], b[1]) && square(b[2], b[3]),
        5 => square(b[0], b[1]) && square(b[2], b[3]) && matches!(b[4], b'q' | b'r' | b'b' | b'n'),
        _ => false,
    }
}

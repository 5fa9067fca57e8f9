//! The terminal `bestmove` line.

use serde::{Deserialize, Serialize};

use super::{is_move_token, Tokens};

/// The engine's final answer to a `go` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestMove {
    /// The move the engine chose.
    pub bestmove: String,
    /// The reply the engine expects, offered for pondering. Unset when the
    /// engine does not suggest one.
    pub ponder: Option<String>,
}

impl BestMove {
    /// Parse a `bestmove <move> [ponder <move>]` line.
    ///
    /// A malformed ponder clause degrades to `ponder: None`; a malformed
    /// best move rejects the whole line.
    pub fn parse(line: &str) -> Option<BestMove> {
        let mut tokens = Tokens::new(line);
        if tokens.next()? != "bestmove" {
            return None;
        }

        let bestmove = tokens.next()?;
        if !is_move_token(bestmove) {
            return None;
        }

        let ponder = match tokens.next() {
            Some("ponder") => tokens.next().filter(|m| is_move_token(m)).map(str::to_owned),
            _ => None,
        };

        Some(BestMove {
            bestmove: bestmove.to_owned(),
            ponder,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_ponder() {
        let bm = BestMove::parse("bestmove e2e4 ponder e7e5").unwrap();
        assert_eq!(bm.bestmove, "e2e4");
        assert_eq!(bm.ponder.as_deref(), Some("e7e5"));
    }

    #[test]
    fn without_ponder() {
        let bm = BestMove::parse("bestmove e2e4").unwrap();
        assert_eq!(bm.bestmove, "e2e4");
        assert_eq!(bm.ponder, None);
    }

    #[test]
    fn promotion_moves() {
        let bm = BestMove::parse("bestmove a7a8q ponder h2h1n").unwrap();
        assert_eq!(bm.bestmove, "a7a8q");
        assert_eq!(bm.ponder.as_deref(), Some("h2h1n"));
    }

    #[test]
    fn malformed_ponder_degrades() {
        let bm = BestMove::parse("bestmove e2e4 ponder zz99").unwrap();
        assert_eq!(bm.bestmove, "e2e4");
        assert_eq!(bm.ponder, None);
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert_eq!(BestMove::parse("bestmove"), None);
        assert_eq!(BestMove::parse("bestmove (none)"), None);
        assert_eq!(BestMove::parse("info depth 1 score cp 0 pv e2e4"), None);
        assert_eq!(BestMove::parse(""), None);
    }
}

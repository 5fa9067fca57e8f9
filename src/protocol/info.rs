//! Search telemetry (`info`) lines.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Tokens;

/// An engine evaluation, from the side-to-move's perspective.
///
/// UCI scores are either centipawns or a signed mate distance, never both.
/// Values are kept exactly as the engine reported them; no renormalization
/// to White's perspective happens anywhere in the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Score {
    /// Centipawn evaluation.
    Cp(i64),
    /// Mate in the given number of moves; negative means the side to move
    /// is getting mated.
    Mate(i64),
}

impl Score {
    /// The centipawn value, if this is a centipawn score.
    pub fn cp(&self) -> Option<i64> {
        match *self {
            Score::Cp(v) => Some(v),
            Score::Mate(_) => None,
        }
    }

    /// The mate distance, if this is a mate score.
    pub fn mate(&self) -> Option<i64> {
        match *self {
            Score::Mate(v) => Some(v),
            Score::Cp(_) => None,
        }
    }

    /// Whether this score announces a forced mate.
    pub fn is_mate(&self) -> bool {
        matches!(self, Score::Mate(_))
    }
}

/// One parsed `info` line of a running search.
///
/// The grammar is `info <k v ...> score (cp|mate) <int> <k v ...> pv <moves>`.
/// The fixed keys `depth`, `seldepth`, `multipv` and `time` are coerced to
/// integers when present; engines legally omit any of them (e.g. `seldepth`
/// on very shallow iterations), in which case the field is `None`. All other
/// telemetry keys are kept as raw text in [`extra`](Self::extra).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchInfo {
    /// Search depth in plies.
    pub depth: Option<u32>,
    /// Selective search depth.
    pub seldepth: Option<u32>,
    /// Which principal variation this line reports (1-based).
    pub multipv: Option<u32>,
    /// Search time in milliseconds.
    pub time: Option<u64>,
    /// Evaluation of this line.
    pub score: Score,
    /// The principal variation, in order.
    pub moves: Vec<String>,
    /// Remaining telemetry keys (`nodes`, `nps`, `hashfull`, ...), raw.
    pub extra: HashMap<String, String>,
}

impl SearchInfo {
    /// Parse an `info` line.
    ///
    /// Returns `None` for lines that do not carry both a score and a pv
    /// (`info string` chatter, `currmove` progress, and any other noise);
    /// callers skip those and keep reading.
    pub fn parse(line: &str) -> Option<SearchInfo> {
        let mut tokens = Tokens::new(line);
        if tokens.next()? != "info" {
            return None;
        }

        let before_score = tokens.until_keyword("score")?;
        tokens.next(); // consume "score"
        let score = match tokens.next()? {
            "cp" => Score::Cp(tokens.next()?.parse().ok()?),
            "mate" => Score::Mate(tokens.next()?.parse().ok()?),
            _ => return None,
        };

        let after_score = tokens.until_keyword("pv")?;
        tokens.next(); // consume "pv"
        let moves: Vec<String> = tokens.map(str::to_owned).collect();
        if moves.is_empty() {
            return None;
        }

        // Everything around the score clause is a flat key/value run. A
        // dangling key without a value (a `lowerbound` flag, say) is dropped
        // rather than failing the line.
        let mut extra = HashMap::new();
        let mut pairs = before_score
            .split_whitespace()
            .chain(after_score.split_whitespace());
        while let Some(key) = pairs.next() {
            let Some(value) = pairs.next() else { break };
            extra.insert(key.to_owned(), value.to_owned());
        }

        Some(SearchInfo {
            depth: take_parsed(&mut extra, "depth"),
            seldepth: take_parsed(&mut extra, "seldepth"),
            multipv: take_parsed(&mut extra, "multipv"),
            time: take_parsed(&mut extra, "time"),
            score,
            moves,
            extra,
        })
    }

    /// The first move of the principal variation.
    pub fn next_move(&self) -> Option<&str> {
        self.moves.first().map(String::as_str)
    }
}

fn take_parsed<T: std::str::FromStr>(extra: &mut HashMap<String, String>, key: &str) -> Option<T> {
    extra.remove(key).and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_info_line() {
        let info = SearchInfo::parse(
            "info depth 10 seldepth 14 multipv 1 score cp 25 nodes 12345 nps 500000 time 30 pv e2e4 e7e5",
        )
        .unwrap();

        assert_eq!(info.score, Score::Cp(25));
        assert_eq!(info.score.cp(), Some(25));
        assert_eq!(info.score.mate(), None);
        assert_eq!(info.moves, ["e2e4", "e7e5"]);
        assert_eq!(info.next_move(), Some("e2e4"));
        assert_eq!(info.depth, Some(10));
        assert_eq!(info.seldepth, Some(14));
        assert_eq!(info.multipv, Some(1));
        assert_eq!(info.time, Some(30));
        assert_eq!(info.extra.get("nodes").map(String::as_str), Some("12345"));
        assert_eq!(info.extra.get("nps").map(String::as_str), Some("500000"));
    }

    #[test]
    fn mate_score() {
        let info = SearchInfo::parse("info depth 20 score mate -3 time 120 pv g8f6").unwrap();
        assert_eq!(info.score, Score::Mate(-3));
        assert!(info.score.is_mate());
        assert_eq!(info.score.cp(), None);
        assert_eq!(info.depth, Some(20));
        assert_eq!(info.seldepth, None);
    }

    #[test]
    fn missing_fixed_keys_are_none() {
        let info = SearchInfo::parse("info depth 1 score cp 7 pv e2e4").unwrap();
        assert_eq!(info.depth, Some(1));
        assert_eq!(info.seldepth, None);
        assert_eq!(info.multipv, None);
        assert_eq!(info.time, None);
    }

    #[test]
    fn dangling_flag_token_is_dropped() {
        let info = SearchInfo::parse("info depth 8 time 40 score cp 13 lowerbound pv e2e4").unwrap();
        assert_eq!(info.depth, Some(8));
        assert_eq!(info.time, Some(40));
        assert!(!info.extra.contains_key("lowerbound"));
    }

    #[test]
    fn noise_lines_are_rejected() {
        assert_eq!(SearchInfo::parse("info string NNUE evaluation enabled"), None);
        assert_eq!(SearchInfo::parse("info depth 5 currmove e2e4 currmovenumber 1"), None);
        assert_eq!(SearchInfo::parse("info depth 5 score cp 10"), None); // no pv
        assert_eq!(SearchInfo::parse("info score cp 10 pv"), None); // empty pv
        assert_eq!(SearchInfo::parse("bestmove e2e4"), None);
        assert_eq!(SearchInfo::parse("info depth 5 score banana 3 pv e2e4"), None);
        assert_eq!(SearchInfo::parse(""), None);
    }

    #[test]
    fn score_sign_is_preserved() {
        let info = SearchInfo::parse("info depth 12 score cp -161 time 9 pv c7c5").unwrap();
        assert_eq!(info.score.cp(), Some(-161));
    }

    #[test]
    fn serializes_to_json() {
        let info = SearchInfo::parse("info depth 2 score cp 30 time 1 pv d2d4 d7d5").unwrap();
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["score"]["cp"], 30);
        assert_eq!(json["moves"][0], "d2d4");
    }
}

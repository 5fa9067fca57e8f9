//! Engine option declarations.

use serde::{Deserialize, Serialize};

use super::Tokens;

/// One option declared by the engine during the handshake.
///
/// Declarations follow `option name <NAME> type <TYPE> [default <VALUE>]`.
/// Name and type may span several tokens; `default`, when present, is kept
/// as the raw remainder of the line starting at the `default` keyword
/// (e.g. `"default 16"`). The driver does generic name/type/default
/// bookkeeping only; option semantics belong to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOption {
    /// Option name, as declared.
    pub name: String,
    /// Declared type (`spin`, `check`, `combo`, `button`, `string`, ...).
    #[serde(rename = "type")]
    pub option_type: String,
    /// Raw default clause, if the declaration carries one.
    pub default: Option<String>,
}

impl EngineOption {
    /// Parse an option declaration line.
    ///
    /// Returns `None` for any line that is not a well-formed declaration;
    /// during the handshake such lines (`id ...` banners and the like) are
    /// silently ignored.
    pub fn parse(line: &str) -> Option<EngineOption> {
        let mut tokens = Tokens::new(line);
        if tokens.next()? != "option" || tokens.next()? != "name" {
            return None;
        }

        let name = tokens.until_keyword("type")?;
        if name.is_empty() {
            return None;
        }
        tokens.next(); // consume "type"

        let (option_type, default) = match tokens.until_keyword("default") {
            Some(ty) => (ty, tokens.rest().map(str::to_owned)),
            None => (tokens.rest()?, None),
        };
        if option_type.is_empty() {
            return None;
        }

        Some(EngineOption {
            name: name.to_owned(),
            option_type: option_type.to_owned(),
            default,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_with_default() {
        let opt = EngineOption::parse("option name Hash type spin default 16").unwrap();
        assert_eq!(opt.name, "Hash");
        assert_eq!(opt.option_type, "spin");
        assert_eq!(opt.default.as_deref(), Some("default 16"));
    }

    #[test]
    fn multi_token_name() {
        let opt = EngineOption::parse("option name Clear Hash type button").unwrap();
        assert_eq!(opt.name, "Clear Hash");
        assert_eq!(opt.option_type, "button");
        assert_eq!(opt.default, None);
    }

    #[test]
    fn check_with_default() {
        let opt = EngineOption::parse("option name Ponder type check default false").unwrap();
        assert_eq!(opt.name, "Ponder");
        assert_eq!(opt.option_type, "check");
        assert_eq!(opt.default.as_deref(), Some("default false"));
    }

    #[test]
    fn string_with_empty_default() {
        let opt = EngineOption::parse("option name SyzygyPath type string default").unwrap();
        assert_eq!(opt.name, "SyzygyPath");
        assert_eq!(opt.option_type, "string");
        assert_eq!(opt.default.as_deref(), Some("default"));
    }

    #[test]
    fn combo_keeps_var_clauses_in_default() {
        let opt = EngineOption::parse(
            "option name Style type combo default Normal var Solid var Normal var Risky",
        )
        .unwrap();
        assert_eq!(opt.name, "Style");
        assert_eq!(opt.option_type, "combo");
        assert_eq!(
            opt.default.as_deref(),
            Some("default Normal var Solid var Normal var Risky")
        );
    }

    #[test]
    fn non_declarations_are_rejected() {
        assert_eq!(EngineOption::parse("id name Stockfish 16"), None);
        assert_eq!(EngineOption::parse("uciok"), None);
        assert_eq!(EngineOption::parse("option name Hash"), None);
        assert_eq!(EngineOption::parse("option type spin"), None);
        assert_eq!(EngineOption::parse(""), None);
    }
}

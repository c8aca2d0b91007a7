//! Tree-walking evaluator.
//!
//! Exactly one branch runs: the first case, in declaration order, whose value
//! equals the switch value, otherwise the default. There is no fallthrough.

use std::fmt;

use serde::Serialize;
use swl_parser::ast::{Print, Switch};

use crate::analyzer::case_value;

/// Which branch ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    MatchedCase(i32),
    MatchedDefault,
    /// No case matched and there is no default. Not an error.
    NoMatch,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::MatchedCase(value) => write!(f, "matched case {}", value),
            Outcome::MatchedDefault => write!(f, "matched default"),
            Outcome::NoMatch => write!(f, "no matching case and no default"),
        }
    }
}

/// Result of running a switch: the printed texts in order, and which
/// branch produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Execution {
    pub outputs: Vec<String>,
    pub outcome: Outcome,
}

impl Execution {
    pub fn matched(&self) -> bool {
        self.outcome != Outcome::NoMatch
    }
}

/// Run `ast` with the switch variable bound to `value`.
///
/// Cases whose value token is not a valid case value never match.
pub fn execute(ast: &Switch, value: i32) -> Execution {
    if let Some(case) = ast
        .cases
        .iter()
        .find(|case| case_value(&case.value) == Some(value))
    {
        log::debug!("I = {}: case {} selected", value, value);
        return run(Outcome::MatchedCase(value), &case.actions);
    }

    match &ast.default {
        Some(default) => {
            log::debug!("I = {}: default selected", value);
            run(Outcome::MatchedDefault, &default.actions)
        }
        None => {
            log::debug!("I = {}: no matching case and no default", value);
            Execution {
                outputs: Vec::new(),
                outcome: Outcome::NoMatch,
            }
        }
    }
}

fn run(outcome: Outcome, actions: &[Print]) -> Execution {
    Execution {
        outputs: actions.iter().map(|p| p.text().to_string()).collect(),
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swl_common::diagnostic::Diagnostics;

    fn parse(source: &str) -> Switch {
        let mut diagnostics = Diagnostics::new();
        swl_parser::parse(source, &mut diagnostics)
    }

    #[test]
    fn no_fallthrough() {
        let ast = parse(
            r#"switch (I) { case 0: print("A"); break; case 1: print("B"); break; default: print("C"); }"#,
        );
        let run = execute(&ast, 1);
        assert_eq!(run.outputs, vec!["B"]);
        assert_eq!(run.outcome, Outcome::MatchedCase(1));
    }

    #[test]
    fn default_actions_in_order() {
        let ast = parse(
            r#"switch (I) { case 0: print("A"); break; default: print("x"); print("y"); }"#,
        );
        let run = execute(&ast, 42);
        assert_eq!(run.outputs, vec!["x", "y"]);
        assert_eq!(run.outcome, Outcome::MatchedDefault);
    }

    #[test]
    fn no_match_without_default() {
        let mut ast = parse(r#"switch (I) { case 0: print("A"); break; default: print("C"); }"#);
        ast.default = None;
        let run = execute(&ast, 9);
        assert!(run.outputs.is_empty());
        assert_eq!(run.outcome, Outcome::NoMatch);
        assert!(!run.matched());
    }

    #[test]
    fn first_duplicate_wins() {
        let ast = parse(
            r#"switch (I) { case 3: print("first"); break; case 3: print("second"); break; default: print("d"); }"#,
        );
        assert_eq!(execute(&ast, 3).outputs, vec!["first"]);
    }

    #[test]
    fn negative_value_takes_default() {
        let ast = parse(r#"switch (I) { case 0: print("zero"); break; default: print("d"); }"#);
        assert_eq!(execute(&ast, -1).outcome, Outcome::MatchedDefault);
    }

    #[test]
    fn outcome_display() {
        assert_eq!(Outcome::MatchedCase(2).to_string(), "matched case 2");
        assert_eq!(Outcome::MatchedDefault.to_string(), "matched default");
        assert_eq!(
            Outcome::NoMatch.to_string(),
            "no matching case and no default"
        );
    }
}

//! Semantic analysis of a parsed switch.
//!
//! Rules, all checked in one pass with every violation reported:
//!
//! 1. the switch variable is the identifier `I` (`S0001`)
//! 2. each case value is a non-negative integer that fits in `i32` (`S0002`)
//! 3. case values are pairwise distinct; later repeats are reported (`S0003`)
//! 4. every case and the default have at least one action (`S0004`)
//! 5. every print string is non-empty (`S0005`)
//!
//! The symbol table is rebuilt on every `analyze` call from whatever cases
//! are present, whether or not errors were found.

use std::fmt;

use rustc_hash::FxHashSet;
use swl_common::config::{Config, OnErrors};
use swl_common::diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
use swl_common::token::{Token, TokenKind, SWITCH_VARIABLE};
use swl_parser::ast::{Node, Switch};

use crate::eval::{self, Execution};
use crate::symbol_table::SymbolTable;

const WRONG_VARIABLE: &str = "S0001";
const INVALID_CASE_VALUE: &str = "S0002";
const DUPLICATE_CASE_VALUE: &str = "S0003";
const EMPTY_BODY: &str = "S0004";
const EMPTY_PRINT: &str = "S0005";

/// The integer a case value token denotes, if it is a valid case value.
pub fn case_value(token: &Token) -> Option<i32> {
    if token.kind != TokenKind::Number {
        return None;
    }
    token.lexeme.parse::<i32>().ok().filter(|value| *value >= 0)
}

/// Why [`Analyzer::execute`] refused to run a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecError {
    /// The last analysis reported `count` diagnostics and the configuration
    /// forbids running invalid programs.
    ProgramHasErrors { count: usize },
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecError::ProgramHasErrors { count } => write!(
                f,
                "refusing to execute: analysis reported {} error(s)",
                count
            ),
        }
    }
}

impl std::error::Error for ExecError {}

/// Validates a [`Switch`] and owns the symbol table built from it.
///
/// One analyzer serves one program at a time. Concurrent analyses need
/// separate analyzers and separate diagnostics sinks.
#[derive(Debug, Default)]
pub struct Analyzer {
    config: Config,
    table: SymbolTable,
    /// Diagnostics reported by the most recent `analyze`.
    errors: usize,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Check `ast`, appending violations to `diagnostics`, and rebuild the
    /// symbol table. The AST is not modified and the sink is not cleared.
    pub fn analyze(&mut self, ast: &Switch, diagnostics: &mut Diagnostics) {
        let before = diagnostics.len();

        let mut checker = Checker {
            diagnostics,
            seen: FxHashSet::default(),
        };
        checker.check(ast.as_node());

        self.table = build_table(ast);
        let reported = diagnostics.since(before);
        for diagnostic in reported {
            log::trace!("{} {}", diagnostic.code, diagnostic);
        }
        self.errors = reported.len();

        log::debug!(
            "analysis finished: {} error(s), {} symbol(s)",
            self.errors,
            self.table.len()
        );
    }

    /// Run `ast` with the switch variable bound to `value`.
    ///
    /// `ast` must be the tree passed to the most recent `analyze`: the
    /// refusal policy consults that run's error count and never looks at
    /// `ast` itself. An analyzer that has not analyzed anything reports no
    /// errors, so it runs any tree. Use [`crate::compile`] to keep the tree
    /// and its analysis together.
    pub fn execute(&self, ast: &Switch, value: i32) -> Result<Execution, ExecError> {
        if self.errors > 0 && self.config.execution.on_errors == OnErrors::Refuse {
            return Err(ExecError::ProgramHasErrors { count: self.errors });
        }
        Ok(eval::execute(ast, value))
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        &self.table
    }

    /// Number of diagnostics the most recent `analyze` reported.
    pub fn error_count(&self) -> usize {
        self.errors
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Walks the tree once, reporting rule violations in detection order.
struct Checker<'d> {
    diagnostics: &'d mut Diagnostics,
    /// Case values declared so far.
    seen: FxHashSet<i32>,
}

impl Checker<'_> {
    fn check(&mut self, node: Node<'_>) {
        match node {
            Node::Switch(switch) => {
                let variable = &switch.variable;
                if variable.kind != TokenKind::Ident || variable.lexeme != SWITCH_VARIABLE {
                    self.error(
                        WRONG_VARIABLE,
                        format!("switch variable must be 'I', found '{}'", variable.lexeme),
                        variable,
                    );
                }
                self.check_children(node);
            }
            Node::Case(case) => {
                let value = case_value(&case.value);
                if value.is_none() {
                    self.error(
                        INVALID_CASE_VALUE,
                        format!("invalid case value: {}", case.value.lexeme),
                        &case.value,
                    );
                }

                self.check_children(node);

                if case.actions.is_empty() {
                    self.error(
                        EMPTY_BODY,
                        "case must contain at least one action".to_string(),
                        &case.value,
                    );
                }

                if let Some(value) = value {
                    if !self.seen.insert(value) {
                        self.error(
                            DUPLICATE_CASE_VALUE,
                            format!("duplicate case value: {}", case.value.lexeme),
                            &case.value,
                        );
                    }
                }
            }
            Node::Default(default) => {
                self.check_children(node);
                if default.actions.is_empty() {
                    // The default branch keeps no token to anchor on.
                    self.diagnostics.push(Diagnostic::unpositioned(
                        DiagnosticKind::Semantic,
                        EMPTY_BODY,
                        "default must contain at least one action",
                    ));
                }
            }
            Node::Print(print) => {
                if print.text().is_empty() {
                    self.error(
                        EMPTY_PRINT,
                        "print string must not be empty".to_string(),
                        &print.text,
                    );
                }
            }
        }
    }

    fn check_children(&mut self, node: Node<'_>) {
        for child in node.children() {
            self.check(child);
        }
    }

    fn error(&mut self, code: &'static str, message: String, token: &Token) {
        self.diagnostics
            .push(Diagnostic::at(DiagnosticKind::Semantic, code, message, token));
    }
}

/// Case value → action texts, first declaration of each value only.
fn build_table(ast: &Switch) -> SymbolTable {
    let mut table = SymbolTable::new();
    for case in &ast.cases {
        let Some(value) = case_value(&case.value) else {
            continue;
        };
        let actions = case.actions.iter().map(|p| p.text().to_string()).collect();
        if !table.insert(value, actions) {
            log::trace!("case {} already in symbol table, keeping first", value);
        }
    }
    table
}

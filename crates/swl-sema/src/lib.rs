//! swl semantic analysis and evaluation.
//!
//! Validates a parsed [`Switch`], builds the case symbol table, and runs the
//! program for a given value of `I`. Diagnostics are rendered with ariadne
//! by the [`diagnostics`] module.
//!
//! [`compile`] chains the whole pipeline: lex, parse, analyze.

pub mod analyzer;
pub mod diagnostics;
pub mod eval;
pub mod symbol_table;

pub use analyzer::{case_value, Analyzer, ExecError};
pub use eval::{Execution, Outcome};
pub use symbol_table::SymbolTable;

use swl_common::config::{Config, OnErrors};
use swl_common::diagnostic::Diagnostics;
use swl_parser::Switch;

/// Everything produced by running the pipeline over one source text.
#[derive(Debug)]
pub struct Compilation {
    ast: Switch,
    diagnostics: Diagnostics,
    analyzer: Analyzer,
    parse_ok: bool,
    analysis_ok: bool,
}

impl Compilation {
    pub fn ast(&self) -> &Switch {
        &self.ast
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Empty when analysis did not run.
    pub fn symbol_table(&self) -> &SymbolTable {
        self.analyzer.symbol_table()
    }

    pub fn parse_ok(&self) -> bool {
        self.parse_ok
    }

    /// False when analysis reported errors or was skipped.
    pub fn analysis_ok(&self) -> bool {
        self.analysis_ok
    }

    pub fn is_ok(&self) -> bool {
        self.parse_ok && self.analysis_ok
    }

    /// Run the program with `I` bound to `value`.
    ///
    /// Any diagnostic, from parsing or analysis, makes this refuse unless
    /// the configuration allows running invalid programs.
    pub fn execute(&self, value: i32) -> Result<Execution, ExecError> {
        if !self.is_ok() && self.analyzer.config().execution.on_errors == OnErrors::Refuse {
            return Err(ExecError::ProgramHasErrors {
                count: self.diagnostics.len(),
            });
        }
        self.analyzer.execute(&self.ast, value)
    }

    /// Render every diagnostic with ariadne.
    pub fn render_errors(&self, source: &str, filename: &str) -> Vec<String> {
        diagnostics::render_all(&self.diagnostics, source, filename)
    }
}

/// Lex, parse and analyze `source` with a fresh diagnostics sink.
///
/// Analysis only runs when parsing reported nothing.
pub fn compile(source: &str, config: Config) -> Compilation {
    let mut diagnostics = Diagnostics::new();
    let ast = swl_parser::parse(source, &mut diagnostics);
    let parse_ok = !diagnostics.has_errors();

    let mut analyzer = Analyzer::with_config(config);
    let analysis_ok = if parse_ok {
        analyzer.analyze(&ast, &mut diagnostics);
        analyzer.error_count() == 0
    } else {
        log::debug!(
            "skipping analysis: parser reported {} error(s)",
            diagnostics.len()
        );
        false
    };

    Compilation {
        ast,
        diagnostics,
        analyzer,
        parse_ok,
        analysis_ok,
    }
}

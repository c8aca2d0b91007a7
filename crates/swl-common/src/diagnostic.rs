//! Diagnostic records and the sink that collects them.
//!
//! Every pipeline stage reports problems by appending to a [`Diagnostics`]
//! value the caller passes in. Nothing is global: independent runs use
//! independent sinks. The sink is never reset by a stage; the caller clears
//! it between runs, which lets several checks accumulate into one batch.

use std::fmt;

use serde::Serialize;

use crate::span::Span;
use crate::token::{LexError, Token};

/// Which stage detected a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    Lex,
    Syntax,
    Semantic,
}

/// One reported problem.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Stable error code, e.g. `S0003`.
    pub code: &'static str,
    pub message: String,
    /// 1-based; 0 when the diagnostic has no natural position.
    pub line: u32,
    /// 1-based; 0 when the diagnostic has no natural position.
    pub column: u32,
    pub span: Option<Span>,
}

impl Diagnostic {
    /// A diagnostic positioned at `token`.
    pub fn at(
        kind: DiagnosticKind,
        code: &'static str,
        message: impl Into<String>,
        token: &Token,
    ) -> Self {
        Self {
            kind,
            code,
            message: message.into(),
            line: token.line,
            column: token.column,
            span: Some(token.span),
        }
    }

    /// A diagnostic with no source anchor (reported at line 0, column 0).
    pub fn unpositioned(kind: DiagnosticKind, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            code,
            message: message.into(),
            line: 0,
            column: 0,
            span: None,
        }
    }

    /// Turn a lexer error token into a diagnostic.
    pub fn lex(error: &LexError, token: &Token) -> Self {
        let code = match error {
            LexError::UnterminatedString => "L0001",
            LexError::InvalidIdentifier(_) => "L0002",
            LexError::UnknownCharacter(_) => "L0003",
        };
        Self::at(DiagnosticKind::Lex, code, error.to_string(), token)
    }

    pub fn is_positioned(&self) -> bool {
        self.span.is_some()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[line {}, column {}]: {}",
            self.line, self.column, self.message
        )
    }
}

/// Append-only, ordered collection of diagnostics.
///
/// Order is detection order. Entries are never deduplicated.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    /// Record a bare `(message, line, column)` entry.
    pub fn add(&mut self, kind: DiagnosticKind, message: impl Into<String>, line: u32, column: u32) {
        let code = match kind {
            DiagnosticKind::Lex => "L0000",
            DiagnosticKind::Syntax => "P0000",
            DiagnosticKind::Semantic => "S0000",
        };
        self.entries.push(Diagnostic {
            kind,
            code,
            message: message.into(),
            line,
            column,
            span: None,
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn all(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries reported after the first `mark` ones, e.g. by a single stage.
    pub fn since(&self, mark: usize) -> &[Diagnostic] {
        &self.entries[mark.min(self.entries.len())..]
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

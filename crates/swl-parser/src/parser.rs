//! Recursive descent parser for swl.
//!
//! # Grammar
//!
//! ```text
//! Program ::= Switch
//! Switch  ::= 'switch' '(' 'I' ')' '{' Case* Default '}'
//! Case    ::= 'case' NUMBER ':' Print+ 'break' ';'
//! Default ::= 'default' ':' Print+
//! Print   ::= 'print' '(' STRING ')' ';'
//! ```
//!
//! The parser pulls one token at a time from the lexer and keeps a single
//! token of lookahead (`current`) plus the last consumed token (`previous`).
//!
//! # Error recovery
//!
//! A failed `consume` reports a diagnostic, then skips tokens until
//! the last consumed token was `;`, the current token starts a construct
//! (`switch`, `case`, `default`, `print`), or input ends. It hands back a
//! zero-width token of the expected kind so the caller can keep building
//! the tree. Only one diagnostic is reported per token position, so a
//! recovery point that fails several expectations in a row stays quiet
//! after the first. A lexer error token in an expected position is reported
//! with the lexer's message and dropped, and the expectation is retried
//! against the token after it.
//!
//! `Print+` is parsed as `Print*`: empty branch bodies are left for the
//! semantic analyzer to reject.

use swl_common::diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
use swl_common::token::{LexError, Token, TokenKind};
use swl_lexer::Lexer;

use crate::ast::{Case, DefaultBranch, Print, Switch};

/// Expected-token mismatch.
const EXPECTED_TOKEN: &str = "P0001";
/// Something other than `I` in the variable slot.
const WRONG_VARIABLE: &str = "P0002";
/// Input left over after the closing brace.
const TRAILING_INPUT: &str = "P0003";

/// Parser over a single swl source text.
///
/// Diagnostics go to the sink passed to [`Parser::new`]; the sink is not
/// cleared first.
pub struct Parser<'src, 'sink> {
    lexer: Lexer<'src>,
    current: Token,
    previous: Token,
    diagnostics: &'sink mut Diagnostics,
    /// Byte offset of the token the last diagnostic was reported at.
    last_error_at: Option<u32>,
}

impl<'src, 'sink> Parser<'src, 'sink> {
    pub fn new(source: &'src str, diagnostics: &'sink mut Diagnostics) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            previous: Token::default(),
            diagnostics,
            last_error_at: None,
        }
    }

    /// Parse the whole program.
    ///
    /// Always returns a tree, possibly partial. Check the diagnostics sink to
    /// learn whether parsing succeeded.
    pub fn parse(mut self) -> Switch {
        let before = self.diagnostics.len();
        let switch = self.parse_switch();
        if !self.check(TokenKind::Eof) {
            self.error_at_current(TRAILING_INPUT, "expected end of input after switch");
        }
        log::debug!(
            "parsed switch with {} case(s), default: {}, {} diagnostic(s)",
            switch.cases.len(),
            switch.default.is_some(),
            self.diagnostics.len() - before
        );
        switch
    }

    // ── Token primitives ───────────────────────────────────────────────

    /// Shift `current` into `previous` and pull the next token.
    fn advance(&mut self) {
        let next = self.lexer.next_token();
        self.previous = std::mem::replace(&mut self.current, next);
    }

    /// Whether the current token has the given kind.
    fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Consume the current token if it has the given kind.
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind, or report `message`, recover,
    /// and return a zero-width stand-in.
    fn consume(&mut self, kind: TokenKind, message: &str) -> Token {
        if self.current.kind == kind {
            let token = self.current.clone();
            self.advance();
            return token;
        }

        let missing = Token::missing(kind.clone(), &self.current);
        self.error_at_current(EXPECTED_TOKEN, message);
        if matches!(self.current.kind, TokenKind::Error(_)) {
            // The lexer's report stands in for this expectation. Drop the
            // bad token and take the expected one if it comes next.
            self.advance();
            if self.current.kind == kind {
                let token = self.current.clone();
                self.advance();
                return token;
            }
        }
        self.synchronize();
        missing
    }

    /// Panic-mode recovery: skip to the next statement boundary.
    fn synchronize(&mut self) {
        while !self.check(TokenKind::Eof) {
            if self.previous.kind == TokenKind::Semicolon {
                return;
            }
            if self.current.kind.starts_statement() {
                return;
            }
            self.advance();
        }
    }

    // ── Error reporting ────────────────────────────────────────────────

    /// Report at the current token. Lexer error tokens report their own
    /// message instead of `message`.
    fn error_at_current(&mut self, code: &'static str, message: &str) {
        let diagnostic = match &self.current.kind {
            TokenKind::Error(error) => Diagnostic::lex(error, &self.current),
            _ => Diagnostic::at(DiagnosticKind::Syntax, code, message, &self.current),
        };
        self.report(diagnostic);
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        let at = self.current.span.start;
        if self.last_error_at == Some(at) {
            log::trace!("suppressed cascading diagnostic: {}", diagnostic.message);
            return;
        }
        self.last_error_at = Some(at);
        self.diagnostics.push(diagnostic);
    }

    // ── Grammar ────────────────────────────────────────────────────────

    fn parse_switch(&mut self) -> Switch {
        self.consume(TokenKind::Switch, "expected 'switch'");
        self.consume(TokenKind::LParen, "expected '(' after 'switch'");
        let variable = self.parse_variable();
        self.consume(TokenKind::RParen, "expected ')' after switch variable");
        self.consume(TokenKind::LBrace, "expected '{' after 'switch (I)'");

        let mut cases = Vec::new();
        while self.check(TokenKind::Case) {
            cases.push(self.parse_case());
        }

        let default = self.parse_default();
        self.consume(TokenKind::RBrace, "expected '}' at end of switch");

        Switch {
            variable,
            cases,
            default,
        }
    }

    /// The variable slot. The grammar hard-codes `I`; any other identifier
    /// is reported, consumed, and kept in the tree so parsing continues
    /// with the structure intact.
    fn parse_variable(&mut self) -> Token {
        if let TokenKind::Error(LexError::InvalidIdentifier(name)) = &self.current.kind {
            let message = format!("expected variable 'I', found '{}'", name);
            let diagnostic =
                Diagnostic::at(DiagnosticKind::Syntax, WRONG_VARIABLE, message, &self.current);
            self.report(diagnostic);
            let token = self.current.clone();
            self.advance();
            return token;
        }
        self.consume(TokenKind::Ident, "expected variable 'I'")
    }

    fn parse_case(&mut self) -> Case {
        self.consume(TokenKind::Case, "expected 'case'");
        let value = self.consume(TokenKind::Number, "expected number after 'case'");
        self.consume(TokenKind::Colon, "expected ':' after case value");

        let actions = self.parse_actions();

        self.consume(TokenKind::Break, "expected 'break' at end of case");
        self.consume(TokenKind::Semicolon, "expected ';' after 'break'");

        log::trace!("case {:?} with {} action(s)", value.lexeme, actions.len());
        Case { value, actions }
    }

    fn parse_default(&mut self) -> Option<DefaultBranch> {
        if !self.eat(TokenKind::Default) {
            self.consume(TokenKind::Default, "expected 'default' branch");
            return None;
        }
        self.consume(TokenKind::Colon, "expected ':' after 'default'");
        Some(DefaultBranch {
            actions: self.parse_actions(),
        })
    }

    fn parse_actions(&mut self) -> Vec<Print> {
        let mut actions = Vec::new();
        while self.check(TokenKind::Print) {
            actions.push(self.parse_print());
        }
        actions
    }

    fn parse_print(&mut self) -> Print {
        self.consume(TokenKind::Print, "expected 'print'");
        self.consume(TokenKind::LParen, "expected '(' after 'print'");
        let text = self.consume(TokenKind::StringLiteral, "expected string literal");
        self.consume(TokenKind::RParen, "expected ')' after string");
        self.consume(TokenKind::Semicolon, "expected ';' after print statement");
        Print { text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_with(source: &str) -> (Switch, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let ast = Parser::new(source, &mut diagnostics).parse();
        (ast, diagnostics)
    }

    fn messages(diagnostics: &Diagnostics) -> Vec<&str> {
        diagnostics.iter().map(|d| d.message.as_str()).collect()
    }

    #[test]
    fn parses_minimal_program() {
        let (ast, diags) =
            parse_with(r#"switch(I){case 0: print("x"); break; default: print("y");}"#);
        assert!(!diags.has_errors(), "{:?}", messages(&diags));
        assert_eq!(ast.variable.lexeme, "I");
        assert_eq!(ast.case_values(), vec!["0"]);
        assert_eq!(ast.cases[0].actions[0].text(), "x");
        assert_eq!(ast.default.as_ref().map(|d| d.actions.len()), Some(1));
    }

    #[test]
    fn zero_cases_allowed() {
        let (ast, diags) = parse_with(r#"switch (I) { default: print("only"); }"#);
        assert!(!diags.has_errors());
        assert!(ast.cases.is_empty());
    }

    #[test]
    fn empty_bodies_are_not_syntax_errors() {
        let (ast, diags) = parse_with("switch (I) { case 1: break; default: }");
        assert!(!diags.has_errors(), "{:?}", messages(&diags));
        assert!(ast.cases[0].actions.is_empty());
        assert_eq!(ast.default.map(|d| d.actions.len()), Some(0));
    }

    #[test]
    fn wrong_variable_keeps_structure() {
        let (ast, diags) =
            parse_with(r#"switch(J){case 1: print("x"); break; default: print("y");}"#);
        assert_eq!(messages(&diags), vec!["expected variable 'I', found 'J'"]);
        assert_eq!(ast.variable.lexeme, "J");
        assert_eq!(ast.cases.len(), 1);
        assert!(ast.default.is_some());
    }

    #[test]
    fn missing_default_is_reported() {
        let (ast, diags) = parse_with(r#"switch (I) { case 1: print("x"); break; }"#);
        assert_eq!(messages(&diags), vec!["expected 'default' branch"]);
        assert!(ast.default.is_none());
    }

    #[test]
    fn lex_error_reports_lexer_message() {
        let (_, diags) = parse_with(r#"switch (I) { default: print("open); }"#);
        let first = &diags.all()[0];
        assert_eq!(first.kind, DiagnosticKind::Lex);
        assert_eq!(first.message, "unterminated string literal");
    }

    #[test]
    fn missing_token_is_zero_width() {
        let (ast, diags) = parse_with(r#"switch (I) { case : print("x"); break; default: print("y"); }"#);
        // Recovery skips the ':' on its way to `print`, so the colon is
        // reported missing too.
        assert_eq!(
            messages(&diags),
            vec!["expected number after 'case'", "expected ':' after case value"]
        );
        assert_eq!(ast.cases[0].actions.len(), 1);
        assert_eq!(ast.cases[0].value.kind, TokenKind::Number);
        assert!(ast.cases[0].value.lexeme.is_empty());
        assert!(ast.cases[0].value.span.is_empty());
    }

    #[test]
    fn trailing_input_is_reported() {
        let (_, diags) = parse_with(r#"switch (I) { default: print("y"); } break"#);
        assert_eq!(messages(&diags), vec!["expected end of input after switch"]);
    }

    #[test]
    fn empty_input_reports_once() {
        let (ast, diags) = parse_with("");
        assert_eq!(messages(&diags), vec!["expected 'switch'"]);
        assert!(ast.cases.is_empty());
        assert!(ast.default.is_none());
    }

    #[test]
    fn sink_is_not_cleared() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.add(DiagnosticKind::Syntax, "earlier run", 1, 1);
        let _ = Parser::new("switch", &mut diagnostics).parse();
        assert_eq!(diagnostics.all()[0].message, "earlier run");
        assert!(diagnostics.len() > 1);
    }
}

use std::fmt;

use serde::Serialize;

use crate::span::Span;

/// A token produced by the swl lexer.
///
/// `lexeme` is the source text the token was scanned from, except for
/// string literals where the surrounding quotes are stripped. Tokens are
/// never mutated after the lexer hands them out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    /// 1-based line of the token's first character.
    pub line: u32,
    /// 1-based column of the token's first character.
    pub column: u32,
    pub span: Span,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        lexeme: impl Into<String>,
        line: u32,
        column: u32,
        span: Span,
    ) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
            span,
        }
    }

    /// A token the parser fabricates when an expected token is missing.
    ///
    /// It has the requested kind, an empty lexeme, and sits at the start of
    /// `at` with zero width.
    pub fn missing(kind: TokenKind, at: &Token) -> Self {
        Self {
            kind,
            lexeme: String::new(),
            line: at.line,
            column: at.column,
            span: Span::empty(at.span.start),
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl Default for Token {
    fn default() -> Self {
        Token::new(TokenKind::Eof, "", 1, 1, Span::empty(0))
    }
}

/// Every kind of token in swl.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    // ── Keywords ───────────────────────────────────────────────────────
    Switch,
    Case,
    Default,
    Break,
    Print,

    // ── Identifiers and literals ───────────────────────────────────────
    /// The switch variable. `I` is the only identifier the lexer accepts.
    Ident,
    /// Unsigned decimal digit run.
    Number,
    /// String literal; the lexeme holds the text between the quotes.
    StringLiteral,

    // ── Punctuation ────────────────────────────────────────────────────
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `:`
    Colon,
    /// `;`
    Semicolon,

    // ── Special ────────────────────────────────────────────────────────
    /// End of input. Repeated on every call once reached.
    Eof,
    /// Input the lexer could not turn into a token.
    Error(LexError),
}

impl TokenKind {
    /// Keywords that may begin a construct; panic-mode recovery stops here.
    pub fn starts_statement(&self) -> bool {
        matches!(
            self,
            TokenKind::Switch | TokenKind::Case | TokenKind::Default | TokenKind::Print
        )
    }
}

/// Why the lexer produced an error token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LexError {
    UnterminatedString,
    /// An identifier other than `I` that is not a keyword.
    InvalidIdentifier(String),
    UnknownCharacter(char),
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnterminatedString => write!(f, "unterminated string literal"),
            LexError::InvalidIdentifier(name) => write!(f, "invalid identifier: {}", name),
            LexError::UnknownCharacter(c) => write!(f, "unknown character: {}", c),
        }
    }
}

impl std::error::Error for LexError {}

/// The name of the only variable a switch may test.
pub const SWITCH_VARIABLE: &str = "I";

/// Look up a keyword from its string representation. Case-sensitive.
pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
    match s {
        "switch" => Some(TokenKind::Switch),
        "case" => Some(TokenKind::Case),
        "default" => Some(TokenKind::Default),
        "break" => Some(TokenKind::Break),
        "print" => Some(TokenKind::Print),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_from_str_recognizes_all_keywords() {
        let keywords = [
            ("switch", TokenKind::Switch),
            ("case", TokenKind::Case),
            ("default", TokenKind::Default),
            ("break", TokenKind::Break),
            ("print", TokenKind::Print),
        ];
        for (s, expected) in &keywords {
            assert_eq!(keyword_from_str(s), Some(expected.clone()), "{s:?}");
        }
    }

    #[test]
    fn keyword_from_str_rejects_non_keywords() {
        assert_eq!(keyword_from_str("I"), None);
        assert_eq!(keyword_from_str("Switch"), None); // case-sensitive
        assert_eq!(keyword_from_str("printf"), None);
        assert_eq!(keyword_from_str(""), None);
    }

    #[test]
    fn lex_error_messages() {
        assert_eq!(
            LexError::UnterminatedString.to_string(),
            "unterminated string literal"
        );
        assert_eq!(
            LexError::InvalidIdentifier("J".into()).to_string(),
            "invalid identifier: J"
        );
        assert_eq!(
            LexError::UnknownCharacter('@').to_string(),
            "unknown character: @"
        );
    }

    #[test]
    fn missing_token_sits_at_anchor() {
        let anchor = Token::new(TokenKind::RBrace, "}", 3, 7, Span::new(40, 41));
        let tok = Token::missing(TokenKind::Semicolon, &anchor);
        assert_eq!(tok.kind, TokenKind::Semicolon);
        assert!(tok.lexeme.is_empty());
        assert_eq!((tok.line, tok.column), (3, 7));
        assert_eq!(tok.span, Span::empty(40));
    }

    #[test]
    fn statement_starts() {
        assert!(TokenKind::Case.starts_statement());
        assert!(TokenKind::Print.starts_statement());
        assert!(!TokenKind::Break.starts_statement());
        assert!(!TokenKind::Semicolon.starts_statement());
    }
}

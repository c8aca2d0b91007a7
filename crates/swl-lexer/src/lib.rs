// swl lexer -- tokenizer for the switch language.

mod cursor;

use cursor::Cursor;
use swl_common::span::Span;
use swl_common::token::{keyword_from_str, LexError, Token, TokenKind, SWITCH_VARIABLE};

/// The swl lexer. Converts source text into a stream of tokens on demand.
///
/// [`Lexer::next_token`] is the pull interface the parser uses; once the
/// input is exhausted it returns `Eof` on every call. The lexer also
/// implements `Iterator<Item = Token>`, which stops after the first `Eof`.
///
/// Lexical problems never abort scanning: they come back as
/// `TokenKind::Error` tokens for the parser to report.
#[derive(Clone)]
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    /// Whether the iterator has already yielded `Eof`.
    emitted_eof: bool,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
            emitted_eof: false,
        }
    }

    /// Convenience: tokenize the entire source into a `Vec<Token>`.
    ///
    /// The returned vector includes the final `Eof` token.
    pub fn tokenize(source: &str) -> Vec<Token> {
        Lexer::new(source).collect()
    }

    /// Produce the next token, skipping whitespace and comments first.
    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();

        let start = self.cursor.pos();
        let line = self.cursor.line();
        let column = self.cursor.column();

        let Some(c) = self.cursor.peek() else {
            return Token::new(TokenKind::Eof, "", line, column, Span::empty(start));
        };

        let token = match c {
            '(' => self.single_char_token(TokenKind::LParen, start, line, column),
            ')' => self.single_char_token(TokenKind::RParen, start, line, column),
            '{' => self.single_char_token(TokenKind::LBrace, start, line, column),
            '}' => self.single_char_token(TokenKind::RBrace, start, line, column),
            ':' => self.single_char_token(TokenKind::Colon, start, line, column),
            ';' => self.single_char_token(TokenKind::Semicolon, start, line, column),
            '"' => self.lex_string(start, line, column),
            c if c.is_ascii_digit() => self.lex_number(start, line, column),
            c if is_ident_start(c) => self.lex_ident(start, line, column),
            c => {
                self.cursor.advance();
                self.make_token(TokenKind::Error(LexError::UnknownCharacter(c)), start, line, column)
            }
        };

        log::trace!(
            "token {:?} {:?} at {}:{}",
            token.kind,
            token.lexeme,
            token.line,
            token.column
        );
        token
    }

    /// Look at the next token without consuming it.
    pub fn peek_token(&self) -> Token {
        self.clone().next_token()
    }

    /// Whether any non-whitespace input remains.
    ///
    /// Only whitespace is skipped here, so a trailing comment still counts
    /// as remaining input.
    pub fn has_more_tokens(&self) -> bool {
        self.cursor
            .rest()
            .chars()
            .any(|c| !matches!(c, ' ' | '\t' | '\r' | '\n'))
    }

    // ── Helpers ──────────────────────────────────────────────────────────

    /// Skip whitespace, `//` line comments and `/* */` block comments.
    fn skip_trivia(&mut self) {
        loop {
            match (self.cursor.peek(), self.cursor.peek_next()) {
                (Some(' ' | '\t' | '\r' | '\n'), _) => {
                    self.cursor.advance();
                }
                (Some('/'), Some('/')) => {
                    self.cursor.eat_while(|c| c != '\n');
                }
                (Some('/'), Some('*')) => self.skip_block_comment(),
                _ => break,
            }
        }
    }

    /// Skip a block comment. An unterminated one silently runs to end of input.
    fn skip_block_comment(&mut self) {
        self.cursor.advance(); // consume '/'
        self.cursor.advance(); // consume '*'
        loop {
            match self.cursor.peek() {
                None => break,
                Some('*') if self.cursor.peek_next() == Some('/') => {
                    self.cursor.advance();
                    self.cursor.advance();
                    break;
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }

    /// Build a token whose lexeme is the source text from `start` to here.
    fn make_token(&self, kind: TokenKind, start: u32, line: u32, column: u32) -> Token {
        let end = self.cursor.pos();
        Token::new(
            kind,
            self.cursor.slice(start, end),
            line,
            column,
            Span::new(start, end),
        )
    }

    fn single_char_token(&mut self, kind: TokenKind, start: u32, line: u32, column: u32) -> Token {
        self.cursor.advance();
        self.make_token(kind, start, line, column)
    }

    // ── Literals ─────────────────────────────────────────────────────────

    /// Lex a string literal. The lexeme is the raw text between the quotes;
    /// a backslash keeps the following character verbatim.
    fn lex_string(&mut self, start: u32, line: u32, column: u32) -> Token {
        self.cursor.advance(); // consume opening '"'
        let content_start = self.cursor.pos();

        loop {
            match self.cursor.peek() {
                None => {
                    return self.make_token(
                        TokenKind::Error(LexError::UnterminatedString),
                        start,
                        line,
                        column,
                    );
                }
                Some('"') => {
                    let content_end = self.cursor.pos();
                    self.cursor.advance(); // consume closing '"'
                    return Token::new(
                        TokenKind::StringLiteral,
                        self.cursor.slice(content_start, content_end),
                        line,
                        column,
                        Span::new(start, self.cursor.pos()),
                    );
                }
                Some('\\') => {
                    self.cursor.advance(); // consume '\'
                    self.cursor.advance(); // consume escaped char
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }

    /// Lex a run of decimal digits. No sign, no fraction.
    fn lex_number(&mut self, start: u32, line: u32, column: u32) -> Token {
        self.cursor.eat_while(|c| c.is_ascii_digit());
        self.make_token(TokenKind::Number, start, line, column)
    }

    /// Lex a keyword, the variable `I`, or an invalid identifier.
    fn lex_ident(&mut self, start: u32, line: u32, column: u32) -> Token {
        self.cursor.eat_while(is_ident_continue);
        let text = self.cursor.slice(start, self.cursor.pos());

        let kind = match keyword_from_str(text) {
            Some(kind) => kind,
            None if text == SWITCH_VARIABLE => TokenKind::Ident,
            None => TokenKind::Error(LexError::InvalidIdentifier(text.to_string())),
        };
        self.make_token(kind, start, line, column)
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.emitted_eof {
            return None;
        }
        let token = self.next_token();
        if token.is_eof() {
            self.emitted_eof = true;
        }
        Some(token)
    }
}

/// Whether a character can start an identifier.
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Whether a character can continue an identifier.
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

//! The lexer itself (spec §4.1): turns a `Cursor` over B source text into a
//! lookahead-capable stream of [`Token`]s.

use std::collections::VecDeque;
use std::fmt;

use gobc_util::{FileId, Span};
use thiserror::Error;

use crate::cursor::Cursor;
use crate::escape::{decode_escapes, EscapeError};
use crate::token::{lookup_keyword, Token, TokenKind};

/// A malformed token. Carries the source position and a message; the
/// offending lexeme text is folded into `message`/`Display` per spec §7's
/// unified `<kind> on line <L>, at token: <tok>: <msg>` format.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Lex error on line {}, at token: {lexeme}: {message}", position.line)]
pub struct LexError {
    pub position: Span,
    pub lexeme: String,
    pub message: String,
}

impl LexError {
    fn new(position: Span, lexeme: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            position,
            lexeme: lexeme.into(),
            message: message.into(),
        }
    }
}

/// Tokenizer over a single B source file.
///
/// `peek`/`next` share a small lookahead buffer: repeated `peek` calls
/// buffer tokens in order without consuming them, and `next` drains the
/// buffer before asking the cursor for more.
pub struct Lexer<'a> {
    name: String,
    cursor: Cursor<'a>,
    file_id: FileId,
    lookahead: VecDeque<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(name: impl Into<String>, source: &'a str) -> Self {
        Self {
            name: name.into(),
            cursor: Cursor::new(source),
            file_id: FileId::DUMMY,
            lookahead: VecDeque::new(),
        }
    }

    pub fn with_file_id(mut self, file_id: FileId) -> Self {
        self.file_id = file_id;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the next token without consuming it. Calling this repeatedly
    /// buffers tokens in order (spec §8: lexer round-trip on peek).
    pub fn peek(&mut self) -> Result<Token, LexError> {
        self.peek_nth(0)
    }

    /// Returns the `n`th token ahead (0 = the very next token) without
    /// consuming any of them.
    pub fn peek_nth(&mut self, n: usize) -> Result<Token, LexError> {
        while self.lookahead.len() <= n {
            let tok = self.scan_token()?;
            self.lookahead.push_back(tok);
        }
        Ok(self.lookahead[n].clone())
    }

    /// Returns and consumes the next token.
    pub fn next(&mut self) -> Result<Token, LexError> {
        if let Some(tok) = self.lookahead.pop_front() {
            return Ok(tok);
        }
        self.scan_token()
    }

    fn span_from(&self, start: (usize, u32, u32)) -> Span {
        let (start_off, line, col) = start;
        Span::with_file(start_off, self.cursor.position(), self.file_id, line, col)
    }

    fn mark(&self) -> (usize, u32, u32) {
        (self.cursor.position(), self.cursor.line(), self.cursor.column())
    }

    fn scan_token(&mut self) -> Result<Token, LexError> {
        self.skip_trivia()?;

        let start = self.mark();
        if self.cursor.is_at_end() {
            return Ok(Token::eof(self.span_from(start)));
        }

        let c = self.cursor.current_char();

        if is_ident_start(c) {
            return Ok(self.scan_ident(start));
        }
        if c.is_ascii_digit() {
            return self.scan_number(start);
        }
        if c == '"' {
            return self.scan_string(start);
        }
        if c == '\'' {
            return self.scan_character(start);
        }

        self.cursor.advance();
        match c {
            '{' => Ok(Token::new(TokenKind::OpenBrace, "{", self.span_from(start))),
            '}' => Ok(Token::new(TokenKind::CloseBrace, "}", self.span_from(start))),
            '(' => Ok(Token::new(TokenKind::OpenParen, "(", self.span_from(start))),
            ')' => Ok(Token::new(TokenKind::CloseParen, ")", self.span_from(start))),
            '[' => Ok(Token::new(TokenKind::OpenBracket, "[", self.span_from(start))),
            ']' => Ok(Token::new(TokenKind::CloseBracket, "]", self.span_from(start))),
            ';' => Ok(Token::new(TokenKind::Semicolon, ";", self.span_from(start))),
            ',' => Ok(Token::new(TokenKind::Comma, ",", self.span_from(start))),
            ':' => Ok(Token::new(TokenKind::Colon, ":", self.span_from(start))),
            '?' => Ok(Token::new(TokenKind::Ternary, "?", self.span_from(start))),
            '<' | '>' | '!' => {
                let mut lexeme = String::from(c);
                if self.cursor.current_char() == '=' {
                    lexeme.push('=');
                    self.cursor.advance();
                }
                Ok(Token::new(TokenKind::Operator, lexeme, self.span_from(start)))
            }
            '=' => {
                let mut lexeme = String::from(c);
                let next = self.cursor.current_char();
                if matches!(next, '=' | '+' | '-' | '*' | '/' | '%' | '&' | '|' | '^') {
                    lexeme.push(next);
                    self.cursor.advance();
                }
                Ok(Token::new(TokenKind::Operator, lexeme, self.span_from(start)))
            }
            '+' | '-' => {
                let mut lexeme = String::from(c);
                if self.cursor.current_char() == c {
                    lexeme.push(c);
                    self.cursor.advance();
                }
                Ok(Token::new(TokenKind::Operator, lexeme, self.span_from(start)))
            }
            '%' | '&' | '~' | '|' | '^' => {
                Ok(Token::new(TokenKind::Operator, c.to_string(), self.span_from(start)))
            }
            '*' => {
                if self.cursor.current_char() == '/' {
                    self.cursor.advance();
                    return Err(LexError::new(
                        self.span_from(start),
                        "*/",
                        "unexpected end of comment",
                    ));
                }
                Ok(Token::new(TokenKind::Operator, "*", self.span_from(start)))
            }
            '/' => {
                // Handled by skip_trivia; reaching here means a bare '/'.
                Ok(Token::new(TokenKind::Operator, "/", self.span_from(start)))
            }
            other => Err(LexError::new(
                self.span_from(start),
                other.to_string(),
                format!("unexpected character: {other}"),
            )),
        }
    }

    /// Skips whitespace and `/* ... */` comments, which may alternate any
    /// number of times before the next real token.
    fn skip_trivia(&mut self) -> Result<(), LexError> {
        loop {
            while !self.cursor.is_at_end() && is_b_whitespace(self.cursor.current_char()) {
                self.cursor.advance();
            }

            if self.cursor.current_char() == '/' && self.cursor.peek_char(1) == '*' {
                let start = self.mark();
                self.cursor.advance();
                self.cursor.advance();

                loop {
                    if self.cursor.is_at_end() {
                        return Err(LexError::new(
                            self.span_from(start),
                            "/*",
                            "unterminated comment",
                        ));
                    }
                    if self.cursor.current_char() == '*' && self.cursor.peek_char(1) == '/' {
                        self.cursor.advance();
                        self.cursor.advance();
                        break;
                    }
                    self.cursor.advance();
                }
                continue;
            }

            break;
        }
        Ok(())
    }

    fn scan_ident(&mut self, start: (usize, u32, u32)) -> Token {
        let byte_start = self.cursor.position();
        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }
        let lexeme = self.cursor.slice_from(byte_start).to_string();
        let kind = if lookup_keyword(&lexeme) {
            TokenKind::Keyword
        } else {
            TokenKind::Ident
        };
        Token::new(kind, lexeme, self.span_from(start))
    }

    fn scan_number(&mut self, start: (usize, u32, u32)) -> Result<Token, LexError> {
        let byte_start = self.cursor.position();
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }
        let digits = self.cursor.slice_from(byte_start).to_string();

        if self.cursor.current_char().is_alphabetic() {
            let suffix_start = self.cursor.position();
            while is_ident_continue(self.cursor.current_char()) {
                self.cursor.advance();
            }
            let suffix = self.cursor.slice_from(suffix_start);
            return Err(LexError::new(
                self.span_from(start),
                format!("{digits}{suffix}"),
                format!("bad number: {digits}{suffix}"),
            ));
        }

        Ok(Token::new(TokenKind::Number, digits, self.span_from(start)))
    }

    fn scan_string(&mut self, start: (usize, u32, u32)) -> Result<Token, LexError> {
        self.cursor.advance(); // opening '"'
        let byte_start = self.cursor.position();

        loop {
            if self.cursor.is_at_end() {
                let raw = self.cursor.slice_from(byte_start).to_string();
                return Err(LexError::new(
                    self.span_from(start),
                    raw,
                    "unterminated string".to_string(),
                ));
            }
            if self.cursor.current_char() == '"' {
                break;
            }
            self.cursor.advance();
        }

        let raw = self.cursor.slice_from(byte_start).to_string();
        self.cursor.advance(); // closing '"'

        decode_escapes(&raw).map_err(|e| escape_error_to_lex(e, &raw, self.span_from(start)))?;

        Ok(Token::new(TokenKind::String, raw, self.span_from(start)))
    }

    fn scan_character(&mut self, start: (usize, u32, u32)) -> Result<Token, LexError> {
        self.cursor.advance(); // opening '\''
        let byte_start = self.cursor.position();

        loop {
            if self.cursor.is_at_end() || self.cursor.current_char() == '\n' {
                let raw = self.cursor.slice_from(byte_start).to_string();
                return Err(LexError::new(
                    self.span_from(start),
                    raw.clone(),
                    format!("unterminated character: {raw}"),
                ));
            }
            if self.cursor.current_char() == '\'' {
                break;
            }
            self.cursor.advance();
        }

        let raw = self.cursor.slice_from(byte_start).to_string();
        self.cursor.advance(); // closing '\''

        let decoded = decode_escapes(&raw)
            .map_err(|e| escape_error_to_lex(e, &raw, self.span_from(start)))?;

        if decoded.len() > 4 {
            return Err(LexError::new(
                self.span_from(start),
                raw.clone(),
                format!("oversized character literal: {raw}"),
            ));
        }

        Ok(Token::new(TokenKind::Character, raw, self.span_from(start)))
    }
}

fn escape_error_to_lex(err: EscapeError, lexeme: &str, span: Span) -> LexError {
    LexError::new(span, lexeme.to_string(), err.to_string())
}

fn is_b_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

impl fmt::Debug for Lexer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lexer").field("name", &self.name).finish()
    }
}

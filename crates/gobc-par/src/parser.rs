//! Parser core: the token cursor with rewind (spec §9) and the small set of
//! accept/expect combinators every grammar rule in `expr.rs`/`stmt.rs`/
//! `items.rs` is built from.

use gobc_lex::{Lexer, Token, TokenKind};
use gobc_util::span::FileId;

use crate::error::{FrontendError, ParseError};

pub type PResult<T> = Result<T, FrontendError>;

/// Recursive-descent parser over a buffered, rewindable token stream.
///
/// Tokens are pulled from the lexer lazily and kept in `tokens` forever
/// (never discarded), so any earlier position can be revisited by moving
/// `cursor` back — this is what makes top-level and statement-shape
/// disambiguation a plain save/restore instead of a backtracking
/// combinator library.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    tokens: Vec<Token>,
    cursor: usize,
}

impl<'a> Parser<'a> {
    pub fn new(name: impl Into<String>, source: &'a str) -> PResult<Self> {
        let mut lexer = Lexer::new(name, source);
        let first = lexer.next()?;
        Ok(Self {
            lexer,
            tokens: vec![first],
            cursor: 0,
        })
    }

    /// Like [`Parser::new`], but tags every span the lexer produces with
    /// `file_id` so callers holding a [`gobc_util::span::SourceMap`] can
    /// render source snippets for diagnostics.
    pub fn new_with_file_id(name: impl Into<String>, source: &'a str, file_id: FileId) -> PResult<Self> {
        let mut lexer = Lexer::new(name, source).with_file_id(file_id);
        let first = lexer.next()?;
        Ok(Self {
            lexer,
            tokens: vec![first],
            cursor: 0,
        })
    }

    pub fn current(&self) -> &Token {
        &self.tokens[self.cursor]
    }

    pub fn save(&self) -> usize {
        self.cursor
    }

    pub fn restore(&mut self, pos: usize) {
        self.cursor = pos;
    }

    pub fn advance(&mut self) -> PResult<()> {
        self.cursor += 1;
        if self.cursor >= self.tokens.len() {
            let tok = self.lexer.next()?;
            self.tokens.push(tok);
        }
        Ok(())
    }

    pub fn accept(&mut self, kind: TokenKind, lexeme: Option<&str>) -> PResult<Option<Token>> {
        let is_match =
            self.current().kind == kind && lexeme.map_or(true, |want| want == self.current().lexeme);

        if !is_match {
            return Ok(None);
        }

        let tok = self.current().clone();
        self.advance()?;
        Ok(Some(tok))
    }

    pub fn accept_kind(&mut self, kind: TokenKind) -> PResult<Option<Token>> {
        self.accept(kind, None)
    }

    pub fn accept_keyword(&mut self, word: &str) -> PResult<Option<Token>> {
        self.accept(TokenKind::Keyword, Some(word))
    }

    pub fn expect(&mut self, kind: TokenKind, lexeme: Option<&str>) -> PResult<Token> {
        if let Some(tok) = self.accept(kind, lexeme)? {
            return Ok(tok);
        }

        let message = match lexeme {
            Some(word) => format!("expected ({kind}: {word})"),
            None => format!("expected {kind}"),
        };
        Err(self.error(message))
    }

    pub fn expect_kind(&mut self, kind: TokenKind) -> PResult<Token> {
        self.expect(kind, None)
    }

    pub fn expect_keyword(&mut self, word: &str) -> PResult<Token> {
        self.expect(TokenKind::Keyword, Some(word))
    }

    pub fn error(&self, message: impl Into<String>) -> FrontendError {
        FrontendError::Parse(ParseError::new(self.current().clone(), message.into()))
    }

    /// Attempts `f` from the current position. On success, returns
    /// `Ok(Some(_))`. On failure, if `f` consumed no tokens the cursor is
    /// restored and `Ok(None)` is returned so the caller can try the next
    /// alternative; if `f` consumed at least one token, the cursor is left
    /// where the failure occurred and the error is propagated (spec §9:
    /// "otherwise the error is propagated").
    pub fn attempt<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<Option<T>> {
        let pos = self.save();
        match f(self) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                if self.cursor == pos {
                    Ok(None)
                } else {
                    Err(err)
                }
            }
        }
    }
}

//! Parser error type (spec §4.3, §7).

use gobc_lex::Token;
use thiserror::Error;

/// Grammar mismatch at a specific token. `gobc-lex`'s `LexError` is
/// surfaced to the caller unchanged and never wrapped in this type (spec
/// §4.3: "a lex error surfaced during tokenization terminates parsing and
/// is returned unchanged").
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Parse error on line {}, at token: {token}: {message}", token.span.line)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl ParseError {
    pub fn new(token: Token, message: impl Into<String>) -> Self {
        Self {
            token,
            message: message.into(),
        }
    }
}

/// Either stage of failure a parse can produce: a malformed token from the
/// lexer, or a grammar mismatch from the parser itself.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FrontendError {
    #[error(transparent)]
    Lex(#[from] gobc_lex::LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

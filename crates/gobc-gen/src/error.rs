//! Emitter error type (spec §4.5).

use gobc_lex::EscapeError;
use thiserror::Error;

/// An escape sequence survived parsing (the lexer already rejected
/// anything malformed) but still fails to decode, or the tree being
/// emitted contains a shape the emitter never expects from a verified
/// `TranslationUnit` (a nested function definition, which the grammar
/// itself can't produce).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmitError {
    #[error("invalid escape in literal: {0}")]
    Escape(#[from] EscapeError),

    #[error("internal emitter error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, EmitError>;

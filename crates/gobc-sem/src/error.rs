//! Semantic error type (spec §4.4, §7).

use thiserror::Error;

/// A violation of one of the five structural rules checked by
/// [`crate::analyzer::verify`]. `node` is the printed form of the AST node
/// the violation was found on (spec §7: single-quoted, not backtick-quoted
/// as the historical implementation renders it).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Semantic error on '{node}': {message}")]
pub struct SemanticError {
    pub node: String,
    pub message: String,
}

impl SemanticError {
    pub fn new(node: impl std::fmt::Display, message: impl Into<String>) -> Self {
        Self {
            node: node.to_string(),
            message: message.into(),
        }
    }
}

//! gobc-util - foundation crate for the gobc pipeline.
//!
//! Provides source-location tracking (`span`), diagnostic construction and
//! rendering (`diagnostic`), and the generic error types shared by the rest
//! of the pipeline (`error`). The per-stage pipeline errors (`LexError` in
//! `gobc-lex`, `ParseError` in `gobc-par`, `SemanticError` in `gobc-sem`)
//! live in the crates that own the data they report on, to avoid a
//! dependency cycle back into this crate.

pub mod diagnostic;
pub mod error;
pub mod span;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticCode, Handler, Level};
pub use error::{DiagnosticError, SourceMapError};
pub use span::{FileId, SourceFile, SourceMap, Span};

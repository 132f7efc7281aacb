//! Semantic analysis for B (spec §4.4): five structural passes over a
//! parsed [`gobc_par::TranslationUnit`] — no type checking, since B has a
//! single machine-word type, and no scope resolution beyond the flat
//! top-level name set.

pub mod analyzer;
pub mod error;

pub use analyzer::{verify, visit_expressions, visit_statements, SResult};
pub use error::SemanticError;

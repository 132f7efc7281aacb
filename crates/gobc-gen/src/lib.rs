//! C source generation for B (spec §4.5): turns a parsed (and, normally,
//! verified) `TranslationUnit` into a single C source file depending on
//! the `bstdlib.h` runtime header.

pub mod emitter;
pub mod error;

pub use emitter::emit;
pub use error::{EmitError, Result};

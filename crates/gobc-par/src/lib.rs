//! Recursive-descent parser for B: turns a token stream into a
//! [`ast::TranslationUnit`].
//!
//! The grammar is split across modules by concern: [`ast`] holds the node
//! types, [`parser`] holds the cursor and accept/expect primitives,
//! [`expr`] and [`stmt`] hold expression/statement grammar rules as
//! `impl Parser` blocks, and [`items`] ties them together at the top level.

pub mod ast;
mod expr;
pub mod error;
mod items;
pub mod parser;
mod stmt;

pub use ast::{CaseArm, Expr, Function, Global, Stmt, TranslationUnit, VarDeclEntry};
pub use error::{FrontendError, ParseError};
pub use parser::{PResult, Parser};

impl<'a> Parser<'a> {
    /// Parses a complete source file into a [`TranslationUnit`].
    pub fn parse(self, source_name: impl Into<String>) -> PResult<TranslationUnit> {
        self.parse_translation_unit(source_name)
    }
}

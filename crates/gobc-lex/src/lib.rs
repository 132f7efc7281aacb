//! gobc-lex - lexical analysis for B source text.
//!
//! Turns UTF-8 B source into a lookahead-capable [`Token`] stream (spec
//! §4.1), exposes the operator precedence table the parser climbs over
//! (§4.2), and centralizes the `*`-escape alphabet (§6) so the lexer can
//! validate it and the emitter (`gobc-gen`) can lower it without
//! duplicating the rules.
//!
//! B's keyword set, escape spellings, and compound-assignment operators are
//! historical B, not C or any other modern language the crate name might
//! suggest.

pub mod cursor;
pub mod escape;
mod lexer;
pub mod operator;
pub mod token;

pub use cursor::{Cursor, CursorSnapshot};
pub use escape::{c_escape_bytes, decode_escapes, EscapeError};
pub use lexer::{LexError, Lexer};
pub use operator::{precedence, rewrite_compound_assign_to_c, Associativity};
pub use token::{lookup_keyword, Token, TokenKind, KEYWORDS};

//! Token model (spec §3, §4.1): tagged token kinds plus the lexeme/span pair
//! the parser consumes.

use gobc_util::Span;
use std::fmt;

/// Keywords recognized by the lexer. `auto` and `extrn` are the declaration
/// forms; the rest are statement/control-flow introducers.
pub const KEYWORDS: &[&str] = &[
    "auto", "break", "case", "default", "else", "extrn", "goto", "if", "return", "switch",
    "while",
];

/// The tag half of a [`Token`].
///
/// `Operator` is a composite bucket: every arithmetic, relational, logical,
/// unary, and assignment spelling shares this one kind, and the lexeme is
/// what distinguishes them (see [`crate::operator::precedence`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Error,
    Eof,
    Number,
    Ident,
    Keyword,
    String,
    Character,
    Operator,
    Semicolon,
    Comma,
    Colon,
    Ternary,
    OpenBrace,
    CloseBrace,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Error => "Error",
            TokenKind::Eof => "EOF",
            TokenKind::Number => "Number",
            TokenKind::Ident => "Identifier",
            TokenKind::Keyword => "Keyword",
            TokenKind::String => "String",
            TokenKind::Character => "Character",
            TokenKind::Operator => "Operator",
            TokenKind::Semicolon => "Semicolon",
            TokenKind::Comma => "Comma",
            TokenKind::Colon => "Colon",
            TokenKind::Ternary => "Ternary",
            TokenKind::OpenBrace => "Open Brace",
            TokenKind::CloseBrace => "Close Brace",
            TokenKind::OpenParen => "Open Paren",
            TokenKind::CloseParen => "Close Paren",
            TokenKind::OpenBracket => "Open Bracket",
            TokenKind::CloseBracket => "Close Bracket",
        };
        f.write_str(name)
    }
}

/// A lexed token: its kind, the source text it came from, and its span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    pub fn error(lexeme: impl Into<String>, span: Span) -> Self {
        Self::new(TokenKind::Error, lexeme, span)
    }

    pub fn eof(span: Span) -> Self {
        Self::new(TokenKind::Eof, "", span)
    }

    /// True for the single-character bracket/punctuation kinds.
    pub fn is_punct(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Semicolon
                | TokenKind::Comma
                | TokenKind::Colon
                | TokenKind::Ternary
                | TokenKind::OpenBrace
                | TokenKind::CloseBrace
                | TokenKind::OpenParen
                | TokenKind::CloseParen
                | TokenKind::OpenBracket
                | TokenKind::CloseBracket
        )
    }

    /// Matches a keyword token against its exact spelling.
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.lexeme == word
    }

    /// Matches an operator token against its exact spelling.
    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && self.lexeme == op
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.lexeme)
    }
}

pub fn lookup_keyword(ident: &str) -> bool {
    KEYWORDS.contains(&ident)
}

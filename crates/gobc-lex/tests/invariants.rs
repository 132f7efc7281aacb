//! Universal invariants from spec §8, checked with property tests rather
//! than a fixed example grid.

use gobc_lex::{decode_escapes, Lexer, TokenKind};
use proptest::prelude::*;

/// "Escape totality": the escape translator accepts a string iff every `*`
/// is followed by a character in the legal alphabet.
fn is_legal_escape(c: char) -> bool {
    matches!(c, '0' | 'e' | '(' | ')' | 't' | '*' | '\'' | '"' | 'n')
}

proptest! {
    #[test]
    fn escape_totality(raw in "[a-zA-Z0-9 ]{0,16}(\\*[a-zA-Z0-9\\(\\)\\*'\" ]){0,4}[a-zA-Z0-9 ]{0,16}") {
        let mut chars = raw.chars().peekable();
        let mut expect_ok = true;
        while let Some(c) = chars.next() {
            if c == '*' {
                match chars.next() {
                    Some(next) if is_legal_escape(next) => {}
                    _ => expect_ok = false,
                }
            }
        }
        prop_assert_eq!(decode_escapes(&raw).is_ok(), expect_ok);
    }

    /// Lexer round-trip on peek: interleaving `peek` then `next` must equal
    /// calling `next` alone, for any valid-looking identifier/operator soup.
    #[test]
    fn peek_next_round_trip(src in "[a-zA-Z_][a-zA-Z0-9_]{0,8}( [a-zA-Z_][a-zA-Z0-9_]{0,8}){0,6}") {
        let mut peeking = Lexer::new("t", &src);
        let mut plain = Lexer::new("t", &src);

        loop {
            let peeked = peeking.peek().unwrap();
            let consumed = peeking.next().unwrap();
            prop_assert_eq!(&peeked, &consumed);

            let direct = plain.next().unwrap();
            prop_assert_eq!(&consumed, &direct);

            if consumed.kind == TokenKind::Eof {
                break;
            }
        }
    }

    /// Parser span monotonicity: tokens come out in nondecreasing
    /// `span.start` order.
    #[test]
    fn token_spans_are_monotonic(src in "[a-zA-Z_][a-zA-Z0-9_ ;(){}]{0,40}") {
        let mut lexer = Lexer::new("t", &src);
        let mut last = 0usize;
        loop {
            let tok = match lexer.next() {
                Ok(t) => t,
                Err(_) => break,
            };
            prop_assert!(tok.span.start >= last);
            last = tok.span.start;
            if tok.kind == TokenKind::Eof {
                break;
            }
        }
    }
}

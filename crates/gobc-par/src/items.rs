//! Top-level grammar (spec §4.4): the extern-init-vs-function disambiguation
//! and the translation-unit loop.

use gobc_lex::TokenKind;

use crate::ast::{Expr, Function, Global, TranslationUnit};
use crate::parser::{PResult, Parser};

impl<'a> Parser<'a> {
    /// `name value;` or `name;` (zero-filled) or `name [size] v0, v1, ...;`.
    fn parse_extern_var_init(&mut self) -> PResult<Global> {
        let ident = self.expect_kind(TokenKind::Ident)?;

        if self.accept_kind(TokenKind::OpenBracket)?.is_some() {
            let size = self.expect_kind(TokenKind::Number)?;
            self.expect_kind(TokenKind::CloseBracket)?;

            let mut values = Vec::new();
            loop {
                values.push(self.parse_constant()?);
                if self.accept_kind(TokenKind::Comma)?.is_none() {
                    break;
                }
            }

            let semi = self.expect_kind(TokenKind::Semicolon)?;
            return Ok(Global::VecInit {
                name: ident.lexeme,
                size: size.lexeme,
                values,
                span: ident.span.merge(semi.span),
            });
        }

        let pos = self.save();
        match self.parse_constant() {
            Ok(value) => {
                let semi = self.expect_kind(TokenKind::Semicolon)?;
                Ok(Global::VarInit {
                    name: ident.lexeme,
                    value,
                    span: ident.span.merge(semi.span),
                })
            }
            Err(_) => {
                self.restore(pos);
                // Empty declarations are zero-filled (spec §4.4).
                let semi = self.expect_kind(TokenKind::Semicolon)?;
                Ok(Global::VarInit {
                    name: ident.lexeme.clone(),
                    value: Expr::Integer {
                        digits: "0".into(),
                        span: ident.span,
                    },
                    span: ident.span.merge(semi.span),
                })
            }
        }
    }

    fn parse_func_declaration(&mut self) -> PResult<Function> {
        let ident = self.expect_kind(TokenKind::Ident)?;
        self.expect_kind(TokenKind::OpenParen)?;
        let params = self.parse_variable_list()?;
        self.expect_kind(TokenKind::CloseParen)?;
        let body = self.parse_statement()?;
        let span = ident.span.merge(body.span());

        Ok(Function {
            name: ident.lexeme,
            params,
            body: Box::new(body),
            span,
        })
    }

    /// `top_level := extern_var_init | func_declaration`. Both start with an
    /// identifier, so the extern-init attempt is tried first; on failure, it
    /// only rewinds (rather than propagating the error) when exactly one
    /// token — the leading identifier — was consumed, matching the
    /// historical disambiguation rule (spec §4.4).
    fn parse_top_level(&mut self) -> PResult<TopLevelItem> {
        let pos = self.save();

        match self.parse_extern_var_init() {
            Ok(global) => return Ok(TopLevelItem::Global(global)),
            Err(err) => {
                if self.save() == pos + 1 {
                    self.restore(pos);
                } else {
                    return Err(err);
                }
            }
        }

        match self.parse_func_declaration() {
            Ok(func) => Ok(TopLevelItem::Function(func)),
            Err(err) => {
                if self.save() != pos {
                    Err(err)
                } else {
                    Err(self.error("expected top level declaration"))
                }
            }
        }
    }

    /// Consumes the whole token stream, building a [`TranslationUnit`] from
    /// the sequence of top-level items.
    pub fn parse_translation_unit(mut self, source_name: impl Into<String>) -> PResult<TranslationUnit> {
        let mut globals = Vec::new();
        let mut functions = Vec::new();

        while self.current().kind != TokenKind::Eof {
            match self.parse_top_level()? {
                TopLevelItem::Global(g) => globals.push(g),
                TopLevelItem::Function(f) => functions.push(f),
            }
        }

        Ok(TranslationUnit {
            source_name: source_name.into(),
            globals,
            functions,
        })
    }
}

enum TopLevelItem {
    Global(Global),
    Function(Function),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> TranslationUnit {
        let parser = Parser::new("test", src).unwrap();
        parser.parse_translation_unit("test").unwrap()
    }

    #[test]
    fn scalar_init_with_value() {
        let unit = parse("x 42;");
        assert_eq!(unit.globals.len(), 1);
        match &unit.globals[0] {
            Global::VarInit { name, value, .. } => {
                assert_eq!(name, "x");
                assert!(matches!(value, Expr::Integer { digits, .. } if digits == "42"));
            }
            other => panic!("unexpected global: {other:?}"),
        }
    }

    #[test]
    fn scalar_init_empty_zero_fills() {
        let unit = parse("x;");
        match &unit.globals[0] {
            Global::VarInit { value, .. } => {
                assert!(matches!(value, Expr::Integer { digits, .. } if digits == "0"));
            }
            other => panic!("unexpected global: {other:?}"),
        }
    }

    #[test]
    fn vector_init_with_values() {
        let unit = parse("arr[3] 1, 2, 3;");
        match &unit.globals[0] {
            Global::VecInit { size, values, .. } => {
                assert_eq!(size, "3");
                assert_eq!(values.len(), 3);
            }
            other => panic!("unexpected global: {other:?}"),
        }
    }

    #[test]
    fn function_with_params_and_body() {
        let unit = parse("main(argc, argv) { return 0; }");
        assert_eq!(unit.functions.len(), 1);
        assert_eq!(unit.functions[0].name, "main");
        assert_eq!(unit.functions[0].params, vec!["argc", "argv"]);
    }

    #[test]
    fn multiple_top_level_items_in_order() {
        let unit = parse("x 1; main() { return x; }");
        assert_eq!(unit.globals.len(), 1);
        assert_eq!(unit.functions.len(), 1);
    }
}

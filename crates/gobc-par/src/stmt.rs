//! Statement grammar (spec §4.4): blocks, declarations, control flow, and
//! the label-vs-expression-statement disambiguation at the bottom of
//! `parse_statement`.

use gobc_util::Span;

use crate::ast::{CaseArm, Stmt, VarDeclEntry};
use crate::parser::{PResult, Parser};
use gobc_lex::TokenKind;

impl<'a> Parser<'a> {
    pub fn parse_block(&mut self) -> PResult<Stmt> {
        let open = self.expect_kind(TokenKind::OpenBrace)?;

        let mut stmts = Vec::new();
        while self.current().kind != TokenKind::CloseBrace {
            stmts.push(self.parse_statement()?);
        }

        let close = self.expect_kind(TokenKind::CloseBrace)?;
        Ok(Stmt::Block {
            stmts,
            span: open.span.merge(close.span),
        })
    }

    fn parse_var_decl(&mut self) -> PResult<Stmt> {
        let kw = self.expect_keyword("auto")?;

        let mut vars = Vec::new();
        loop {
            let ident = self.expect_kind(TokenKind::Ident)?;

            if self.accept_kind(TokenKind::OpenBracket)?.is_some() {
                let size = self.expect_kind(TokenKind::Number)?;
                self.expect_kind(TokenKind::CloseBracket)?;
                vars.push(VarDeclEntry {
                    name: ident.lexeme,
                    is_vector: true,
                    size: Some(size.lexeme),
                });
            } else {
                vars.push(VarDeclEntry {
                    name: ident.lexeme,
                    is_vector: false,
                    size: None,
                });
            }

            if self.accept_kind(TokenKind::Comma)?.is_none() {
                break;
            }
        }

        let semi = self.expect_kind(TokenKind::Semicolon)?;

        if vars.is_empty() {
            return Err(self.error("expected at least 1 variable in auto declaration"));
        }

        Ok(Stmt::VarDecl {
            vars,
            span: kw.span.merge(semi.span),
        })
    }

    fn parse_extern_var_decl(&mut self) -> PResult<Stmt> {
        let kw = self.expect_keyword("extrn")?;
        let names = self.parse_variable_list()?;
        let semi = self.expect_kind(TokenKind::Semicolon)?;

        if names.is_empty() {
            return Err(self.error("expected at least 1 variable in extrn declaration"));
        }

        Ok(Stmt::ExternVarDecl {
            names,
            span: kw.span.merge(semi.span),
        })
    }

    /// Zero or more comma-separated identifiers (spec §4.4: used by both
    /// `extrn` declarations and function parameter lists).
    pub fn parse_variable_list(&mut self) -> PResult<Vec<String>> {
        let mut vars = Vec::new();

        let Some(first) = self.accept_kind(TokenKind::Ident)? else {
            return Ok(vars);
        };
        vars.push(first.lexeme);

        while self.accept_kind(TokenKind::Comma)?.is_some() {
            let ident = self.expect_kind(TokenKind::Ident)?;
            vars.push(ident.lexeme);
        }

        Ok(vars)
    }

    fn parse_if(&mut self) -> PResult<Stmt> {
        let kw = self.expect_keyword("if")?;
        self.expect_kind(TokenKind::OpenParen)?;
        let cond = self.parse_expression()?;
        self.expect_kind(TokenKind::CloseParen)?;
        let then_branch = self.parse_statement()?;

        let mut span = kw.span.merge(then_branch.span());
        let else_branch = if self.accept_keyword("else")?.is_some() {
            let else_stmt = self.parse_statement()?;
            span = span.merge(else_stmt.span());
            Some(Box::new(else_stmt))
        } else {
            None
        };

        Ok(Stmt::If {
            cond,
            then_branch: Box::new(then_branch),
            else_branch,
            span,
        })
    }

    fn parse_while(&mut self) -> PResult<Stmt> {
        let kw = self.expect_keyword("while")?;
        self.expect_kind(TokenKind::OpenParen)?;
        let cond = self.parse_expression()?;
        self.expect_kind(TokenKind::CloseParen)?;
        let body = self.parse_statement()?;
        let span = kw.span.merge(body.span());

        Ok(Stmt::While {
            cond,
            body: Box::new(body),
            span,
        })
    }

    /// Consumes statements up to (but not including) the next `case`,
    /// `default`, or closing brace — the three tokens that end a `switch`
    /// arm.
    fn parse_case_body(&mut self) -> PResult<Vec<Stmt>> {
        let mut stmts = Vec::new();
        loop {
            if self.current().kind == TokenKind::CloseBrace
                || self.current().is_keyword("case")
                || self.current().is_keyword("default")
            {
                break;
            }
            stmts.push(self.parse_statement()?);
        }
        Ok(stmts)
    }

    fn parse_switch(&mut self) -> PResult<Stmt> {
        let kw = self.expect_keyword("switch")?;
        self.expect_kind(TokenKind::OpenParen)?;
        let cond = self.parse_expression()?;
        self.expect_kind(TokenKind::CloseParen)?;
        self.expect_kind(TokenKind::OpenBrace)?;

        let mut cases = Vec::new();
        let mut default: Option<Vec<Stmt>> = None;

        loop {
            if let Some(close) = self.accept_kind(TokenKind::CloseBrace)? {
                let span = kw.span.merge(close.span);
                return Ok(Stmt::Switch {
                    cond,
                    cases,
                    default,
                    span,
                });
            }

            if self.accept_keyword("case")?.is_some() {
                let case_cond = self.parse_constant()?;
                self.expect_kind(TokenKind::Colon)?;
                let stmts = self.parse_case_body()?;
                cases.push(CaseArm {
                    cond: case_cond,
                    stmts,
                });
            } else if self.accept_keyword("default")?.is_some() {
                self.expect_kind(TokenKind::Colon)?;
                if default.is_some() {
                    return Err(self.error("multiple 'default' cases"));
                }
                default = Some(self.parse_case_body()?);
            } else {
                return Err(self.error("expected 'case' or 'default'"));
            }
        }
    }

    /// Statement dispatch (spec §4.4): tries each alternative in turn via
    /// [`Parser::attempt`], falls through to the keyword-led forms, then the
    /// ident-led label/bare-statement rewind, and finally a bare expression
    /// statement.
    pub fn parse_statement(&mut self) -> PResult<Stmt> {
        if let Some(stmt) = self.attempt(Self::parse_if)? {
            return Ok(stmt);
        }
        if let Some(stmt) = self.attempt(Self::parse_block)? {
            return Ok(stmt);
        }
        if let Some(stmt) = self.attempt(Self::parse_var_decl)? {
            return Ok(stmt);
        }
        if let Some(stmt) = self.attempt(Self::parse_extern_var_decl)? {
            return Ok(stmt);
        }
        if let Some(stmt) = self.attempt(Self::parse_while)? {
            return Ok(stmt);
        }
        if let Some(stmt) = self.attempt(Self::parse_switch)? {
            return Ok(stmt);
        }

        if let Some(semi) = self.accept_kind(TokenKind::Semicolon)? {
            return Ok(Stmt::Null { span: semi.span });
        }

        if let Some(kw) = self.accept_keyword("break")? {
            let semi = self.expect_kind(TokenKind::Semicolon)?;
            return Ok(Stmt::Break {
                span: kw.span.merge(semi.span),
            });
        }

        if let Some(kw) = self.accept_keyword("return")? {
            if let Some(semi) = self.accept_kind(TokenKind::Semicolon)? {
                return Ok(Stmt::Return {
                    value: None,
                    span: kw.span.merge(semi.span),
                });
            }
            let value = self.parse_expression()?;
            let semi = self.expect_kind(TokenKind::Semicolon)?;
            return Ok(Stmt::Return {
                value: Some(value),
                span: kw.span.merge(semi.span),
            });
        }

        if let Some(kw) = self.accept_keyword("goto")? {
            let label = self.expect_kind(TokenKind::Ident)?;
            let semi = self.expect_kind(TokenKind::Semicolon)?;
            return Ok(Stmt::Goto {
                label: label.lexeme,
                span: kw.span.merge(semi.span),
            });
        }

        let pos = self.save();
        if let Some(ident) = self.accept_kind(TokenKind::Ident)? {
            if let Some(colon) = self.accept_kind(TokenKind::Colon)? {
                return Ok(Stmt::Label {
                    name: ident.lexeme,
                    span: ident.span.merge(colon.span),
                });
            }
            if let Some(semi) = self.accept_kind(TokenKind::Semicolon)? {
                let span = ident.span.merge(semi.span);
                return Ok(Stmt::Statement {
                    expr: crate::ast::Expr::Ident {
                        name: ident.lexeme,
                        span: ident.span,
                    },
                    span,
                });
            }
            self.restore(pos);
        }

        let expr = self.parse_expression()?;
        let semi = self.expect_kind(TokenKind::Semicolon)?;
        let span: Span = expr.span().merge(semi.span);
        Ok(Stmt::Statement { expr, span })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn parse_stmt(src: &str) -> Stmt {
        let mut parser = Parser::new("test", src).unwrap();
        parser.parse_statement().unwrap()
    }

    #[test]
    fn empty_statement() {
        assert!(matches!(parse_stmt(";"), Stmt::Null { .. }));
    }

    #[test]
    fn label_then_bare_ident_statement_disambiguate() {
        assert!(matches!(parse_stmt("foo:"), Stmt::Label { .. }));
        assert!(matches!(parse_stmt("foo;"), Stmt::Statement { .. }));
    }

    #[test]
    fn if_else_chains() {
        let stmt = parse_stmt("if (a) b; else c;");
        match stmt {
            Stmt::If { else_branch, .. } => assert!(else_branch.is_some()),
            other => panic!("expected if, got {other:?}"),
        }
    }

    #[test]
    fn while_loop_body() {
        assert!(matches!(parse_stmt("while (a) b;"), Stmt::While { .. }));
    }

    #[test]
    fn auto_decl_with_vector() {
        let stmt = parse_stmt("auto a, b[10];");
        match stmt {
            Stmt::VarDecl { vars, .. } => {
                assert_eq!(vars.len(), 2);
                assert!(vars[1].is_vector);
                assert_eq!(vars[1].size.as_deref(), Some("10"));
            }
            other => panic!("expected var decl, got {other:?}"),
        }
    }

    #[test]
    fn switch_with_default() {
        let stmt = parse_stmt("switch (a) { case 1: b; default: c; }");
        match stmt {
            Stmt::Switch { cases, default, .. } => {
                assert_eq!(cases.len(), 1);
                assert!(default.is_some());
            }
            other => panic!("expected switch, got {other:?}"),
        }
    }

    #[test]
    fn return_with_and_without_value() {
        assert!(matches!(
            parse_stmt("return;"),
            Stmt::Return { value: None, .. }
        ));
        assert!(matches!(
            parse_stmt("return 1;"),
            Stmt::Return { value: Some(_), .. }
        ));
    }

    #[test]
    fn goto_and_break() {
        assert!(matches!(parse_stmt("goto done;"), Stmt::Goto { .. }));
        assert!(matches!(parse_stmt("break;"), Stmt::Break { .. }));
    }
}

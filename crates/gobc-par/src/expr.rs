//! Expression grammar (spec §4.3): unary wrapping, the precedence-reshape
//! climb, and primary expressions with postfix array-access/call chains.

use gobc_lex::{precedence, Token, TokenKind};

use crate::ast::Expr;
use crate::parser::{PResult, Parser};

impl<'a> Parser<'a> {
    /// `constant := NUMBER | CHARACTER | STRING`
    pub fn parse_constant(&mut self) -> PResult<Expr> {
        let tok = self.current().clone();
        match tok.kind {
            TokenKind::Number => {
                self.advance()?;
                Ok(Expr::Integer {
                    digits: tok.lexeme,
                    span: tok.span,
                })
            }
            TokenKind::Character => {
                self.advance()?;
                Ok(Expr::Character {
                    raw: tok.lexeme,
                    span: tok.span,
                })
            }
            TokenKind::String => {
                self.advance()?;
                Ok(Expr::String {
                    raw: tok.lexeme,
                    span: tok.span,
                })
            }
            _ => Err(self.error("expected one of: Number, Character, String")),
        }
    }

    /// `sub_expr := prefix_op? primary postfix_op?`
    pub fn parse_sub_expression(&mut self) -> PResult<Expr> {
        let prefix = self.accept_prefix_op()?;

        let mut expr = self.parse_primary()?;

        if let Some(op_tok) = prefix {
            let span = op_tok.span.merge(expr.span());
            expr = Expr::Unary {
                op: op_tok.lexeme,
                operand: Box::new(expr),
                postfix: false,
                span,
            };
        }

        if self.current().kind == TokenKind::Operator {
            let op = self.current().lexeme.clone();
            if op == "++" || op == "--" {
                let op_tok = self.current().clone();
                self.advance()?;
                let span = expr.span().merge(op_tok.span);
                expr = Expr::Unary {
                    op,
                    operand: Box::new(expr),
                    postfix: true,
                    span,
                };
            }
        }

        Ok(expr)
    }

    fn accept_prefix_op(&mut self) -> PResult<Option<Token>> {
        if self.current().kind != TokenKind::Operator {
            return Ok(None);
        }

        match self.current().lexeme.as_str() {
            "*" | "&" | "-" | "!" | "++" | "--" | "~" => {
                let tok = self.current().clone();
                self.advance()?;
                Ok(Some(tok))
            }
            _ => Ok(None),
        }
    }

    /// `expr := sub_expr (OP expr)? ('?' expr ':' expr)?`
    ///
    /// The precedence-reshape rotation (spec §4.3): when the right operand
    /// of `OP` is itself a freshly parsed `Binary`, compare precedences and
    /// rotate so the tighter-binding operator ends up lower in the tree.
    /// Equal-precedence chains keep the right-associative reading as-is
    /// (spec §9 open question: associativity of same-level chains is
    /// unspecified upstream; only this single pairwise rotation is
    /// implemented).
    pub fn parse_expression(&mut self) -> PResult<Expr> {
        let mut node = self.parse_sub_expression()?;

        if self.current().kind == TokenKind::Operator {
            let op_tok = self.current().clone();
            self.advance()?;
            let rhs = self.parse_expression()?;

            node = match rhs {
                Expr::Binary {
                    op: rhs_op,
                    left: rhs_left,
                    right: rhs_right,
                    span: rhs_span,
                } => {
                    let left_prec = precedence(&op_tok.lexeme).map(|(level, _)| level);
                    let right_prec = precedence(&rhs_op).map(|(level, _)| level);

                    if left_prec > right_prec {
                        let inner_span = node.span().merge(rhs_left.span());
                        let inner = Expr::Binary {
                            left: Box::new(node),
                            op: op_tok.lexeme,
                            right: rhs_left,
                            span: inner_span,
                        };
                        let span = inner.span().merge(rhs_right.span());
                        Expr::Binary {
                            left: Box::new(inner),
                            op: rhs_op,
                            right: rhs_right,
                            span,
                        }
                    } else {
                        let span = node.span().merge(rhs_span);
                        Expr::Binary {
                            left: Box::new(node),
                            op: op_tok.lexeme,
                            right: Box::new(Expr::Binary {
                                left: rhs_left,
                                op: rhs_op,
                                right: rhs_right,
                                span: rhs_span,
                            }),
                            span,
                        }
                    }
                }
                other => {
                    let span = node.span().merge(other.span());
                    Expr::Binary {
                        left: Box::new(node),
                        op: op_tok.lexeme,
                        right: Box::new(other),
                        span,
                    }
                }
            };
        }

        if self.accept_kind(TokenKind::Ternary)?.is_some() {
            let then_expr = self.parse_expression()?;
            self.expect_kind(TokenKind::Colon)?;
            let else_expr = self.parse_expression()?;
            let span = node.span().merge(else_expr.span());
            node = Expr::Ternary {
                cond: Box::new(node),
                then_expr: Box::new(then_expr),
                else_expr: Box::new(else_expr),
                span,
            };
        }

        Ok(node)
    }

    fn parse_paren(&mut self) -> PResult<Expr> {
        let open = self.expect_kind(TokenKind::OpenParen)?;
        let inner = self.parse_expression()?;
        let close = self.expect_kind(TokenKind::CloseParen)?;
        Ok(Expr::Paren {
            inner: Box::new(inner),
            span: open.span.merge(close.span),
        })
    }

    fn parse_ident_expr(&mut self) -> PResult<Expr> {
        let tok = self.expect_kind(TokenKind::Ident)?;
        Ok(Expr::Ident {
            name: tok.lexeme,
            span: tok.span,
        })
    }

    /// `primary := '(' expr ')' | constant | IDENT`, each optionally
    /// followed by any number of `[expr]` / `(args)` suffixes.
    pub fn parse_primary(&mut self) -> PResult<Expr> {
        let mut node = match self.current().kind {
            TokenKind::OpenParen => self.parse_paren()?,
            TokenKind::Number | TokenKind::Character | TokenKind::String => {
                self.parse_constant()?
            }
            TokenKind::Ident => self.parse_ident_expr()?,
            _ => return Err(self.error("expected primary expression")),
        };

        loop {
            if self.accept_kind(TokenKind::OpenBracket)?.is_some() {
                let index = self.parse_expression()?;
                let close = self.expect_kind(TokenKind::CloseBracket)?;
                let span = node.span().merge(close.span);
                node = Expr::ArrayAccess {
                    array: Box::new(node),
                    index: Box::new(index),
                    span,
                };
                continue;
            }

            if self.accept_kind(TokenKind::OpenParen)?.is_some() {
                let mut args = Vec::new();
                if self.current().kind != TokenKind::CloseParen {
                    loop {
                        args.push(self.parse_expression()?);
                        if self.accept_kind(TokenKind::Comma)?.is_none() {
                            break;
                        }
                    }
                }
                let close = self.expect_kind(TokenKind::CloseParen)?;
                let span = node.span().merge(close.span);
                node = Expr::FunctionCall {
                    callee: Box::new(node),
                    args,
                    span,
                };
                continue;
            }

            break;
        }

        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_expr(src: &str) -> Expr {
        let mut parser = Parser::new("test", src).unwrap();
        parser.parse_expression().unwrap()
    }

    #[test]
    fn precedence_reshape_example() {
        // a=b+c---d  ==>  (a = (b + (c-- - d)))
        let expr = parse_expr("a=b+c---d");
        assert_eq!(expr.to_precedence_string(), "(a = (b + (c-- - d)))");
    }

    #[test]
    fn array_access_and_call_chain() {
        let expr = parse_expr("a[0](1,2)");
        match expr {
            Expr::FunctionCall { callee, args, .. } => {
                assert_eq!(args.len(), 2);
                assert!(matches!(*callee, Expr::ArrayAccess { .. }));
            }
            other => panic!("expected call, got {other:?}"),
        }
    }

    #[test]
    fn ternary_parses_with_colon() {
        let expr = parse_expr("a ? b : c");
        assert!(matches!(expr, Expr::Ternary { .. }));
    }

    #[test]
    fn prefix_and_postfix_combine() {
        let expr = parse_expr("*p++");
        // postfix binds to the primary before the prefix wraps it
        match expr {
            Expr::Unary { op, operand, postfix: false, .. } => {
                assert_eq!(op, "*");
                assert!(matches!(*operand, Expr::Unary { postfix: true, .. }));
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn simple_binary_has_no_rotation_needed() {
        let expr = parse_expr("a+b");
        assert_eq!(expr.to_precedence_string(), "(a + b)");
    }
}

//! Structural verification of a parsed [`TranslationUnit`] (spec §4.4).
//!
//! Verification is a sequence of five passes, each halting the whole
//! verification on its first violation. Unlike the historical
//! implementation this is grounded on, each pass runs to completion over
//! the whole unit before the next begins, matching the order they're
//! described in; declarations-first is additionally restructured to reset
//! its "seen a non-declaration" flag at each nested block rather than
//! carrying one flag across an entire function body.

use std::collections::HashSet;

use gobc_par::{CaseArm, Expr, Function, Stmt, TranslationUnit};

use crate::error::SemanticError;

pub type SResult<T> = Result<T, SemanticError>;

/// Runs all five passes over `unit`, stopping at the first violation.
pub fn verify(unit: &TranslationUnit) -> SResult<()> {
    check_unique_names(unit)?;

    for function in &unit.functions {
        check_body_is_block(function)?;
    }
    for function in &unit.functions {
        check_declarations_first(function)?;
    }
    for function in &unit.functions {
        check_assignment_shapes(function)?;
    }
    for function in &unit.functions {
        check_labels_resolved(function)?;
    }

    Ok(())
}

/// Pass 1: every top-level name (function or global) must be unique.
fn check_unique_names(unit: &TranslationUnit) -> SResult<()> {
    let mut seen: HashSet<&str> = HashSet::new();

    for function in &unit.functions {
        if !seen.insert(function.name.as_str()) {
            return Err(SemanticError::new(
                Stmt::Function(function.clone()),
                "Duplicate function name",
            ));
        }
    }
    for global in &unit.globals {
        if !seen.insert(global.name()) {
            return Err(SemanticError::new(global.as_stmt(), "Duplicate variable name"));
        }
    }

    Ok(())
}

/// Pass 2: a function's body must be a `Block`, never a bare statement.
fn check_body_is_block(function: &Function) -> SResult<()> {
    if matches!(*function.body, Stmt::Block { .. }) {
        Ok(())
    } else {
        Err(SemanticError::new(
            function.body.as_ref(),
            "expected Block",
        ))
    }
}

/// Pass 3: within any single `Block`, declarations must all precede the
/// first non-declaration statement. A nested block restarts the check from
/// scratch — a declaration inside an inner block is never in "the middle"
/// of its enclosing block.
fn check_declarations_first(function: &Function) -> SResult<()> {
    check_block_decls_first(function.body.as_ref())
}

fn is_decl(stmt: &Stmt) -> bool {
    matches!(stmt, Stmt::VarDecl { .. } | Stmt::ExternVarDecl { .. })
}

/// Checks one block's own statement list, then recurses to re-check every
/// nested block's list with a fresh `seen_non_decl`.
fn check_block_decls_first(stmt: &Stmt) -> SResult<()> {
    if let Stmt::Block { stmts, .. } = stmt {
        let mut seen_non_decl = false;
        for s in stmts {
            if is_decl(s) {
                if seen_non_decl {
                    return Err(SemanticError::new(s, "var declaration in middle of block"));
                }
            } else {
                seen_non_decl = true;
            }
        }
    }

    for child in compound_bodies(stmt) {
        check_block_decls_first(child)?;
    }
    Ok(())
}

/// The nested statement lists a compound statement introduces, each of
/// which restarts the declarations-first discipline locally.
fn compound_bodies(stmt: &Stmt) -> Vec<&Stmt> {
    match stmt {
        Stmt::Block { stmts, .. } => stmts.iter().collect(),
        Stmt::If {
            then_branch,
            else_branch,
            ..
        } => {
            let mut v = vec![then_branch.as_ref()];
            if let Some(e) = else_branch {
                v.push(e.as_ref());
            }
            v
        }
        Stmt::While { body, .. } => vec![body.as_ref()],
        Stmt::Switch { cases, default, .. } => {
            let mut v: Vec<&Stmt> = cases.iter().flat_map(|c| c.stmts.iter()).collect();
            if let Some(d) = default {
                v.extend(d.iter());
            }
            v
        }
        _ => Vec::new(),
    }
}

/// Pass 4: every `Statement(Binary{"=", l, r})` anywhere in the function
/// must have an lvalue on the left. `r` needs no check beyond having
/// parsed as an `Expr` at all, which Rust's type system already guarantees.
fn check_assignment_shapes(function: &Function) -> SResult<()> {
    visit_statements(function.body.as_ref(), &mut |stmt| {
        if let Stmt::Statement {
            expr: Expr::Binary { op, left, .. },
            ..
        } = stmt
        {
            if op == "=" && !left.is_lvalue() {
                return Err(SemanticError::new(left.as_ref(), "expected lvalue"));
            }
        }
        Ok(())
    })
}

/// Pass 5: every function's gotos must target a label declared somewhere
/// in that same function, and no two labels may share a name.
fn check_labels_resolved(function: &Function) -> SResult<()> {
    let mut labels: HashSet<&str> = HashSet::new();
    let mut gotos: Vec<&Stmt> = Vec::new();

    visit_statements(function.body.as_ref(), &mut |stmt| {
        match stmt {
            Stmt::Label { name, .. } => {
                if !labels.insert(name.as_str()) {
                    return Err(SemanticError::new(stmt, "duplicate label definition"));
                }
            }
            Stmt::Goto { .. } => gotos.push(stmt),
            _ => {}
        }
        Ok(())
    })?;

    for goto in gotos {
        if let Stmt::Goto { label, .. } = goto {
            if !labels.contains(label.as_str()) {
                return Err(SemanticError::new(goto, "unresolved goto"));
            }
        }
    }

    Ok(())
}

/// Visits `stmt` and every statement nested under it — blocks, both arms of
/// an `If`, a `While` body, and every `Switch` case/default body — calling
/// `f` on each in source order. Stops at the first error `f` returns.
pub fn visit_statements<'a>(
    stmt: &'a Stmt,
    f: &mut impl FnMut(&'a Stmt) -> SResult<()>,
) -> SResult<()> {
    f(stmt)?;
    for child in compound_bodies(stmt) {
        visit_statements(child, f)?;
    }
    Ok(())
}

/// Visits every expression in "condition position" under `stmt`: `If`/
/// `While`/`Switch` conditions, each `CaseArm`'s condition, a bare
/// `Statement`'s expression, and a `Return`'s value — recursing into
/// nested compound statements the same way [`visit_statements`] does.
pub fn visit_expressions<'a>(
    stmt: &'a Stmt,
    f: &mut impl FnMut(&'a Expr) -> SResult<()>,
) -> SResult<()> {
    match stmt {
        Stmt::If { cond, .. } | Stmt::While { cond, .. } => f(cond)?,
        Stmt::Switch { cond, cases, .. } => {
            f(cond)?;
            for CaseArm { cond, .. } in cases {
                f(cond)?;
            }
        }
        Stmt::Statement { expr, .. } => f(expr)?,
        Stmt::Return { value: Some(expr), .. } => f(expr)?,
        Stmt::ExternVarInit { value, .. } => f(value)?,
        Stmt::ExternVecInit { values, .. } => {
            for v in values {
                f(v)?;
            }
        }
        _ => {}
    }

    for child in compound_bodies(stmt) {
        visit_expressions(child, f)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gobc_par::Parser;

    fn parse(src: &str) -> TranslationUnit {
        let parser = Parser::new("test", src).unwrap();
        parser.parse("test").unwrap()
    }

    #[test]
    fn clean_program_verifies() {
        let unit = parse("main() { auto x; x = 1; return x; }");
        assert!(verify(&unit).is_ok());
    }

    #[test]
    fn duplicate_function_name_is_rejected() {
        let unit = parse("f() { return 0; } f() { return 1; }");
        let err = verify(&unit).unwrap_err();
        assert_eq!(err.message, "Duplicate function name");
    }

    #[test]
    fn duplicate_variable_name_is_rejected() {
        let unit = parse("x 1; x 2; main() { return 0; }");
        let err = verify(&unit).unwrap_err();
        assert_eq!(err.message, "Duplicate variable name");
    }

    #[test]
    fn label_and_goto_resolve_cleanly() {
        let unit = parse("f() { auto a; goto L; L: return a; }");
        assert!(verify(&unit).is_ok());
    }

    #[test]
    fn unresolved_goto_is_rejected() {
        let unit = parse("f() { goto X; }");
        let err = verify(&unit).unwrap_err();
        assert_eq!(err.message, "unresolved goto");
    }

    #[test]
    fn duplicate_label_is_rejected() {
        let unit = parse("f() { L: return 0; L: return 1; }");
        let err = verify(&unit).unwrap_err();
        assert_eq!(err.message, "duplicate label definition");
    }

    #[test]
    fn declaration_after_statement_is_rejected() {
        let unit = parse("f() { auto a; a = 1; auto b; }");
        let err = verify(&unit).unwrap_err();
        assert_eq!(err.message, "var declaration in middle of block");
    }

    #[test]
    fn nested_block_restarts_declaration_discipline() {
        // The outer block has a statement before its inner `{}`, but the
        // inner block's own decl-then-statement order is still fine — it
        // must not be flagged just because the outer block already saw a
        // non-declaration statement.
        let unit = parse("f() { auto a; a = 1; if (a) { auto b; b = 2; } }");
        assert!(verify(&unit).is_ok());
    }

    #[test]
    fn assignment_to_non_lvalue_is_rejected() {
        let unit = parse("f() { 1 = 2; }");
        let err = verify(&unit).unwrap_err();
        assert_eq!(err.message, "expected lvalue");
    }

    #[test]
    fn assignment_to_dereference_is_accepted() {
        let unit = parse("f() { auto p; *p = 1; }");
        assert!(verify(&unit).is_ok());
    }

    #[test]
    fn function_body_must_be_block() {
        // The grammar only ever builds `Block` bodies, so this exercises
        // the pass directly rather than through the parser.
        let function = Function {
            name: "f".into(),
            params: vec![],
            body: Box::new(Stmt::Null {
                span: gobc_util::Span::new(0, 0, 1, 1),
            }),
            span: gobc_util::Span::new(0, 0, 1, 1),
        };
        let err = check_body_is_block(&function).unwrap_err();
        assert_eq!(err.message, "expected Block");
    }
}

//! C source emission from a verified `TranslationUnit` (spec §4.5).
//!
//! The emitter is never invoked on a tree that failed to parse, but may
//! run on one that failed semantic verification (spec §9, preserved
//! historical quirk — enforced by the driver, not here).

use std::fmt::Write as _;

use gobc_lex::{c_escape_bytes, decode_escapes, rewrite_compound_assign_to_c};
use gobc_par::{CaseArm, Expr, Function, Global, Stmt, TranslationUnit};

use crate::error::{EmitError, Result};

/// Replaces every `.` with `_` — the only translation C identifiers need,
/// since the lexer admits only `[A-Za-z0-9_.]` (spec §6).
fn sanitize_ident(name: &str) -> String {
    name.replace('.', "_")
}

/// Renders a `TranslationUnit` as a complete C source file.
pub fn emit(unit: &TranslationUnit) -> Result<String> {
    let mut emitter = CEmitter::new();
    emitter.emit_unit(unit)?;
    Ok(emitter.out)
}

struct CEmitter {
    out: String,
    level: usize,
}

impl CEmitter {
    fn new() -> Self {
        Self {
            out: String::new(),
            level: 0,
        }
    }

    fn write_indent(&mut self) {
        for _ in 0..self.level {
            self.out.push('\t');
        }
    }

    /// Indents one level shallower than the surrounding body — used for
    /// `case`/`default` labels and `goto` labels (spec §4.5).
    fn write_dedent(&mut self) {
        for _ in 0..self.level.saturating_sub(1) {
            self.out.push('\t');
        }
    }

    fn emit_unit(&mut self, unit: &TranslationUnit) -> Result<()> {
        writeln!(self.out, "/* Generated by gobc. Do not edit. */").unwrap();
        writeln!(self.out).unwrap();
        writeln!(self.out, "#include \"bstdlib.h\"").unwrap();
        writeln!(self.out).unwrap();

        for global in &unit.globals {
            self.emit_global(global)?;
        }
        if !unit.globals.is_empty() {
            writeln!(self.out).unwrap();
        }

        for function in &unit.functions {
            self.emit_prototype(function);
        }
        if !unit.functions.is_empty() {
            writeln!(self.out).unwrap();
        }

        for function in &unit.functions {
            self.emit_function(function)?;
            writeln!(self.out).unwrap();
        }

        Ok(())
    }

    fn emit_global(&mut self, global: &Global) -> Result<()> {
        match global {
            Global::VarInit { name, value, .. } => {
                let value = self.emit_expr(value)?;
                writeln!(
                    self.out,
                    "static B_AUTO {} = {value};",
                    sanitize_ident(name)
                )
                .unwrap();
            }
            Global::VecInit {
                name, size, values, ..
            } => {
                let values = values
                    .iter()
                    .map(|v| self.emit_expr(v))
                    .collect::<Result<Vec<_>>>()?
                    .join(", ");
                writeln!(
                    self.out,
                    "static B_AUTO {}[][{size}] = {{ {values} }};",
                    sanitize_ident(name)
                )
                .unwrap();
            }
        }
        Ok(())
    }

    fn param_list(function: &Function) -> String {
        function
            .params
            .iter()
            .map(|p| format!("B_AUTO {}", sanitize_ident(p)))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn emit_prototype(&mut self, function: &Function) {
        writeln!(
            self.out,
            "static B_AUTO {}({});",
            sanitize_ident(&function.name),
            Self::param_list(function)
        )
        .unwrap();
    }

    fn emit_function(&mut self, function: &Function) -> Result<()> {
        write!(
            self.out,
            "static B_AUTO {}({}) ",
            sanitize_ident(&function.name),
            Self::param_list(function)
        )
        .unwrap();

        match function.body.as_ref() {
            Stmt::Block { stmts, .. } => self.emit_block_stmts(stmts)?,
            _ => {
                return Err(EmitError::Internal(
                    "function body is not a block".into(),
                ))
            }
        }
        writeln!(self.out).unwrap();
        Ok(())
    }

    fn emit_block_stmts(&mut self, stmts: &[Stmt]) -> Result<()> {
        writeln!(self.out, "{{").unwrap();
        self.level += 1;
        for stmt in stmts {
            self.write_stmt_indent(stmt);
            self.emit_stmt(stmt)?;
            writeln!(self.out).unwrap();
        }
        self.level -= 1;
        self.write_indent();
        write!(self.out, "}}").unwrap();
        Ok(())
    }

    /// A `Label` dedents one level (spec §4.5: "written at dedent-1");
    /// every other statement indents normally.
    fn write_stmt_indent(&mut self, stmt: &Stmt) {
        if matches!(stmt, Stmt::Label { .. }) {
            self.write_dedent();
        } else {
            self.write_indent();
        }
    }

    /// Emits `stmt` as the body of an `If`/`While`: inline if it's already
    /// a `Block`, otherwise on its own indented line (spec §4.5).
    fn emit_branch(&mut self, stmt: &Stmt) -> Result<()> {
        match stmt {
            Stmt::Block { stmts, .. } => self.emit_block_stmts(stmts),
            other => {
                writeln!(self.out).unwrap();
                self.level += 1;
                self.write_indent();
                self.emit_stmt(other)?;
                self.level -= 1;
                Ok(())
            }
        }
    }

    fn emit_stmt(&mut self, stmt: &Stmt) -> Result<()> {
        match stmt {
            Stmt::Block { stmts, .. } => self.emit_block_stmts(stmts)?,
            Stmt::Null { .. } => write!(self.out, ";").unwrap(),
            Stmt::Statement { expr, .. } => {
                let expr = self.emit_expr(expr)?;
                write!(self.out, "{expr};").unwrap();
            }
            Stmt::VarDecl { vars, .. } => {
                let names: Vec<String> = vars
                    .iter()
                    .map(|v| match &v.size {
                        Some(size) => format!("{}[{size}]", sanitize_ident(&v.name)),
                        None => sanitize_ident(&v.name),
                    })
                    .collect();
                write!(self.out, "B_AUTO {};", names.join(", ")).unwrap();
            }
            Stmt::ExternVarDecl { names, .. } => {
                let names: Vec<String> = names.iter().map(|n| sanitize_ident(n)).collect();
                write!(self.out, "/* extrn {}; */", names.join(", ")).unwrap();
            }
            Stmt::ExternVarInit { .. } | Stmt::ExternVecInit { .. } | Stmt::Function(_) => {
                return Err(EmitError::Internal(
                    "top-level node found inside a function body".into(),
                ))
            }
            Stmt::If {
                cond,
                then_branch,
                else_branch,
                ..
            } => {
                let cond = self.emit_expr(cond)?;
                write!(self.out, "if ({cond}) ").unwrap();
                self.emit_branch(then_branch)?;
                if let Some(else_branch) = else_branch {
                    writeln!(self.out).unwrap();
                    self.write_indent();
                    write!(self.out, "else ").unwrap();
                    self.emit_branch(else_branch)?;
                }
            }
            Stmt::While { cond, body, .. } => {
                let cond = self.emit_expr(cond)?;
                write!(self.out, "while ({cond}) ").unwrap();
                self.emit_branch(body)?;
            }
            Stmt::Switch {
                cond,
                cases,
                default,
                ..
            } => self.emit_switch(cond, cases, default.as_deref())?,
            Stmt::Break { .. } => write!(self.out, "break;").unwrap(),
            Stmt::Return { value, .. } => match value {
                Some(value) => {
                    let value = self.emit_expr(value)?;
                    write!(self.out, "return {value};").unwrap();
                }
                None => write!(self.out, "return ;").unwrap(),
            },
            Stmt::Goto { label, .. } => {
                write!(self.out, "goto {};", sanitize_ident(label)).unwrap();
            }
            Stmt::Label { name, .. } => {
                write!(self.out, "{}:", sanitize_ident(name)).unwrap();
            }
        }
        Ok(())
    }

    fn emit_switch(
        &mut self,
        cond: &Expr,
        cases: &[CaseArm],
        default: Option<&[Stmt]>,
    ) -> Result<()> {
        let cond = self.emit_expr(cond)?;
        writeln!(self.out, "switch ({cond}) {{").unwrap();
        self.level += 1;

        for case in cases {
            self.write_dedent();
            let case_cond = self.emit_expr(&case.cond)?;
            writeln!(self.out, "case {case_cond}:").unwrap();
            for stmt in &case.stmts {
                self.write_stmt_indent(stmt);
                self.emit_stmt(stmt)?;
                writeln!(self.out).unwrap();
            }
        }

        if let Some(default_stmts) = default {
            self.write_dedent();
            writeln!(self.out, "default:").unwrap();
            for stmt in default_stmts {
                self.write_stmt_indent(stmt);
                self.emit_stmt(stmt)?;
                writeln!(self.out).unwrap();
            }
        }

        self.level -= 1;
        self.write_indent();
        write!(self.out, "}}").unwrap();
        Ok(())
    }

    fn emit_expr(&self, expr: &Expr) -> Result<String> {
        Ok(match expr {
            Expr::Integer { digits, .. } => digits.clone(),
            Expr::Character { raw, .. } => {
                let bytes = decode_escapes(raw)?;
                format!("'{}'", c_escape_bytes(&bytes, b'\''))
            }
            Expr::String { raw, .. } => {
                let bytes = decode_escapes(raw)?;
                format!("\"{}\"", c_escape_bytes(&bytes, b'"'))
            }
            Expr::Ident { name, .. } => sanitize_ident(name),
            Expr::Paren { inner, .. } => format!("({})", self.emit_expr(inner)?),
            Expr::ArrayAccess { array, index, .. } => {
                format!("{}[{}]", self.emit_expr(array)?, self.emit_expr(index)?)
            }
            Expr::FunctionCall { callee, args, .. } => {
                let args = args
                    .iter()
                    .map(|a| self.emit_expr(a))
                    .collect::<Result<Vec<_>>>()?
                    .join(", ");
                format!("{}({args})", self.emit_expr(callee)?)
            }
            Expr::Unary {
                op, operand, postfix, ..
            } => {
                let operand = self.emit_expr(operand)?;
                if *postfix {
                    format!("{operand}{op}")
                } else {
                    format!("{op}{operand}")
                }
            }
            Expr::Binary { op, left, right, .. } => {
                let op = rewrite_compound_assign_to_c(op).unwrap_or(op.as_str());
                format!("{} {op} {}", self.emit_expr(left)?, self.emit_expr(right)?)
            }
            Expr::Ternary {
                cond,
                then_expr,
                else_expr,
                ..
            } => format!(
                "{} ? {} : {}",
                self.emit_expr(cond)?,
                self.emit_expr(then_expr)?,
                self.emit_expr(else_expr)?
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gobc_par::Parser;

    fn emit_source(src: &str) -> String {
        let unit = Parser::new("test", src).unwrap().parse("test").unwrap();
        emit(&unit).unwrap()
    }

    #[test]
    fn end_to_end_emission_contains_expected_pieces_in_order() {
        let out = emit_source("main() { auto x; x = 1; return x; }");
        let banner = out.find("/* Generated").unwrap();
        let include = out.find("#include \"bstdlib.h\"").unwrap();
        let proto = out.find("static B_AUTO main();").unwrap();
        let def = out.find("static B_AUTO main() {").unwrap();
        assert!(banner < include && include < proto && proto < def);

        let squashed: String = out.chars().filter(|c| !c.is_whitespace()).collect();
        assert!(squashed.contains("B_AUTOx;x=1;returnx;"));
    }

    #[test]
    fn string_escape_translates_to_c() {
        let out = emit_source(r#"main() { auto s; s = "hi*nworld"; return 0; }"#);
        assert!(out.contains("\"hi\\nworld\""));
    }

    #[test]
    fn brace_escape_translates_literally() {
        let out = emit_source(r#"main() { auto s; s = "*("; return 0; }"#);
        assert!(out.contains("\"{\""));
    }

    #[test]
    fn compound_assign_rewritten_to_modern_c() {
        let out = emit_source("main() { auto x; x =+ 1; return x; }");
        assert!(out.contains("x += 1;"));
    }

    #[test]
    fn vector_global_emits_double_bracket_form() {
        let out = emit_source("arr[3] 1, 2, 3; main() { return 0; }");
        assert!(out.contains("static B_AUTO arr[][3] = { 1, 2, 3 };"));
    }

    #[test]
    fn extern_decl_is_a_comment() {
        let out = emit_source("g 1; main() { extrn g; return g; }");
        assert!(out.contains("/* extrn g; */"));
    }

    #[test]
    fn identifier_dots_become_underscores() {
        let out = emit_source("main() { auto x.y; x.y = 1; return x.y; }");
        assert!(out.contains("x_y"));
        assert!(!out.contains("x.y"));
    }

    #[test]
    fn switch_labels_dedent_one_level() {
        let out = emit_source("main() { switch (1) { case 1: break; default: break; } return 0; }");
        let lines: Vec<&str> = out.lines().collect();
        let case_line = lines.iter().find(|l| l.trim_start() == "case 1:").unwrap();
        let break_line = lines
            .iter()
            .find(|l| l.trim_start() == "break;" && l.contains('\t'))
            .unwrap();
        let case_indent = case_line.chars().take_while(|c| *c == '\t').count();
        let break_indent = break_line.chars().take_while(|c| *c == '\t').count();
        assert!(case_indent < break_indent);
    }
}

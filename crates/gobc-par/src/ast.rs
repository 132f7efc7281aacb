//! The B abstract syntax tree (spec §3): a closed, tagged family split into
//! expression nodes (`Expr`) and statement nodes (`Stmt`). Ownership of
//! child nodes is exclusive to the parent; nothing is shared and no cycles
//! arise in well-formed trees.

use gobc_util::Span;
use std::fmt;

/// Expression nodes: value-producing, never followed by a bare `;` of their
/// own (a `;` after one makes it a [`Stmt::Statement`]).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A digit lexeme; semantically a machine word.
    Integer { digits: String, span: Span },
    /// Up to four post-escape bytes packed into one word. `raw` is the
    /// pre-escape lexeme as the lexer saw it (escapes use `*` as lead).
    Character { raw: String, span: Span },
    /// An immutable byte sequence, pre-escape lexeme form.
    String { raw: String, span: Span },
    /// Reference to a named value. `.` survives lexing and is only
    /// remapped to `_` at C emission (spec §6).
    Ident { name: String, span: Span },
    /// Explicit `( expr )` grouping.
    Paren { inner: Box<Expr>, span: Span },
    ArrayAccess {
        array: Box<Expr>,
        index: Box<Expr>,
        span: Span,
    },
    FunctionCall {
        callee: Box<Expr>,
        args: Vec<Expr>,
        span: Span,
    },
    /// Prefix set `{* & - ! ++ -- ~}`, postfix set `{++ --}`.
    Unary {
        op: String,
        operand: Box<Expr>,
        postfix: bool,
        span: Span,
    },
    Binary {
        op: String,
        left: Box<Expr>,
        right: Box<Expr>,
        span: Span,
    },
    Ternary {
        cond: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Integer { span, .. }
            | Expr::Character { span, .. }
            | Expr::String { span, .. }
            | Expr::Ident { span, .. }
            | Expr::Paren { span, .. }
            | Expr::ArrayAccess { span, .. }
            | Expr::FunctionCall { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Ternary { span, .. } => *span,
        }
    }

    /// True for the lvalue shapes the semantic analyzer accepts on the left
    /// of `=` (spec §3 invariant, §4.4 rule 4): an identifier, an array
    /// access, or a dereference `*x`.
    pub fn is_lvalue(&self) -> bool {
        match self {
            Expr::Ident { .. } | Expr::ArrayAccess { .. } => true,
            Expr::Unary { op, postfix, .. } => op == "*" && !postfix,
            _ => false,
        }
    }

    /// Renders the tree with explicit parens at every binary operator, so
    /// precedence is visible in the printed form (spec §8 scenario 3).
    pub fn to_precedence_string(&self) -> String {
        match self {
            Expr::Binary { left, op, right, .. } => format!(
                "({} {} {})",
                left.to_precedence_string(),
                op,
                right.to_precedence_string()
            ),
            Expr::Unary { op, operand, postfix, .. } => {
                if *postfix {
                    format!("{}{}", operand.to_precedence_string(), op)
                } else {
                    format!("{}{}", op, operand.to_precedence_string())
                }
            }
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Integer { digits, .. } => write!(f, "{digits}"),
            Expr::Character { raw, .. } => write!(f, "'{raw}'"),
            Expr::String { raw, .. } => write!(f, "\"{raw}\""),
            Expr::Ident { name, .. } => write!(f, "{name}"),
            Expr::Paren { inner, .. } => write!(f, "({inner})"),
            Expr::ArrayAccess { array, index, .. } => write!(f, "{array}[{index}]"),
            Expr::FunctionCall { callee, args, .. } => {
                let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                write!(f, "{callee}({})", args.join(", "))
            }
            Expr::Unary { op, operand, postfix, .. } => {
                if *postfix {
                    write!(f, "{operand}{op}")
                } else {
                    write!(f, "{op}{operand}")
                }
            }
            Expr::Binary { left, op, right, .. } => write!(f, "{left} {op} {right}"),
            Expr::Ternary { cond, then_expr, else_expr, .. } => {
                write!(f, "{cond} ? {then_expr} : {else_expr}")
            }
        }
    }
}

/// One `auto` local: a scalar or a fixed-size vector.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclEntry {
    pub name: String,
    pub is_vector: bool,
    pub size: Option<String>,
}

/// One `case` arm of a `switch`.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseArm {
    pub cond: Expr,
    pub stmts: Vec<Stmt>,
}

/// A function definition. Only ever appears at top level
/// (`TranslationUnit::functions`); also reachable through
/// [`Stmt::Function`] so the statement visitors of `gobc-sem` can dispatch
/// on it uniformly with every other node.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub params: Vec<String>,
    pub body: Box<Stmt>,
    pub span: Span,
}

/// Statement nodes: non-value, optionally terminated with `;`.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Block { stmts: Vec<Stmt>, span: Span },
    /// The empty statement, `;` alone.
    Null { span: Span },
    /// An expression used as a statement, terminated with `;`.
    Statement { expr: Expr, span: Span },
    VarDecl { vars: Vec<VarDeclEntry>, span: Span },
    ExternVarDecl { names: Vec<String>, span: Span },
    /// Top-level scalar initializer: `name value;` or `name;` (zero-filled).
    ExternVarInit { name: String, value: Expr, span: Span },
    /// Top-level vector initializer: `name [size] v0, v1, ...;`.
    ExternVecInit {
        name: String,
        size: String,
        values: Vec<Expr>,
        span: Span,
    },
    Function(Function),
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
        span: Span,
    },
    While { cond: Expr, body: Box<Stmt>, span: Span },
    Switch {
        cond: Expr,
        cases: Vec<CaseArm>,
        default: Option<Vec<Stmt>>,
        span: Span,
    },
    Break { span: Span },
    Return { value: Option<Expr>, span: Span },
    Goto { label: String, span: Span },
    Label { name: String, span: Span },
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Block { span, .. }
            | Stmt::Null { span }
            | Stmt::Statement { span, .. }
            | Stmt::VarDecl { span, .. }
            | Stmt::ExternVarDecl { span, .. }
            | Stmt::ExternVarInit { span, .. }
            | Stmt::ExternVecInit { span, .. }
            | Stmt::If { span, .. }
            | Stmt::While { span, .. }
            | Stmt::Switch { span, .. }
            | Stmt::Break { span }
            | Stmt::Return { span, .. }
            | Stmt::Goto { span, .. }
            | Stmt::Label { span, .. } => *span,
            Stmt::Function(func) => func.span,
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Block { stmts, .. } => {
                writeln!(f, "{{")?;
                for s in stmts {
                    writeln!(f, "\t{s}")?;
                }
                write!(f, "}}")
            }
            Stmt::Null { .. } => write!(f, ""),
            Stmt::Statement { expr, .. } => write!(f, "{expr};"),
            Stmt::VarDecl { vars, .. } => {
                let names: Vec<String> = vars
                    .iter()
                    .map(|v| match &v.size {
                        Some(size) => format!("{}[{}]", v.name, size),
                        None => v.name.clone(),
                    })
                    .collect();
                write!(f, "auto {};", names.join(", "))
            }
            Stmt::ExternVarDecl { names, .. } => write!(f, "extrn {};", names.join(", ")),
            Stmt::ExternVarInit { name, value, .. } => write!(f, "{name} {value};"),
            Stmt::ExternVecInit {
                name, size, values, ..
            } => {
                let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "{name}[{size}] {};", values.join(", "))
            }
            Stmt::Function(func) => {
                write!(f, "{}({}) {}", func.name, func.params.join(", "), func.body)
            }
            Stmt::If {
                cond,
                then_branch,
                else_branch,
                ..
            } => {
                write!(f, "if({cond}) {then_branch}")?;
                if let Some(else_branch) = else_branch {
                    write!(f, " else {else_branch}")?;
                }
                Ok(())
            }
            Stmt::While { cond, body, .. } => write!(f, "while({cond}) {body}"),
            Stmt::Switch { cond, .. } => write!(f, "switch({cond}) {{ ... }}"),
            Stmt::Break { .. } => write!(f, "break;"),
            Stmt::Return { value, .. } => match value {
                Some(v) => write!(f, "return {v};"),
                None => write!(f, "return;"),
            },
            Stmt::Goto { label, .. } => write!(f, "goto {label};"),
            Stmt::Label { name, .. } => write!(f, "{name}:"),
        }
    }
}

/// A global: either an `extrn` scalar or vector initializer. Order is
/// preserved from source and is observable in emitted output.
#[derive(Debug, Clone, PartialEq)]
pub enum Global {
    VarInit { name: String, value: Expr, span: Span },
    VecInit {
        name: String,
        size: String,
        values: Vec<Expr>,
        span: Span,
    },
}

impl Global {
    pub fn name(&self) -> &str {
        match self {
            Global::VarInit { name, .. } | Global::VecInit { name, .. } => name,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Global::VarInit { span, .. } | Global::VecInit { span, .. } => *span,
        }
    }

    /// View as the corresponding `Stmt` variant, for visitors that operate
    /// uniformly over the statement sum type.
    pub fn as_stmt(&self) -> Stmt {
        match self {
            Global::VarInit { name, value, span } => Stmt::ExternVarInit {
                name: name.clone(),
                value: value.clone(),
                span: *span,
            },
            Global::VecInit {
                name,
                size,
                values,
                span,
            } => Stmt::ExternVecInit {
                name: name.clone(),
                size: size.clone(),
                values: values.clone(),
                span: *span,
            },
        }
    }
}

/// One B source file after parsing: globals and function definitions in
/// source order.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationUnit {
    pub source_name: String,
    pub globals: Vec<Global>,
    pub functions: Vec<Function>,
}

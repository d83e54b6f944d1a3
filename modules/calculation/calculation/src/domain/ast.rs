//! Expression tree produced by the parser and consumed by lowering.

use std::fmt;

/// A parsed arithmetic expression.
///
/// Operators are kept as written; mapping them onto operation types happens
/// during lowering so that a well-formed but unsupported operator is reported
/// as such rather than as a syntax error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    /// Numeric literal text, unsigned, exactly as it appears in the source.
    Literal(String),
    Paren(Box<Expr>),
    Unary { op: char, operand: Box<Expr> },
    Binary { op: char, left: Box<Expr>, right: Box<Expr> },
}

impl Expr {
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    #[must_use]
    pub fn paren(inner: Self) -> Self {
        Self::Paren(Box::new(inner))
    }

    #[must_use]
    pub fn unary(op: char, operand: Self) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    #[must_use]
    pub fn binary(op: char, left: Self, right: Self) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Moves the direct children out, leaving empty literals behind.
    fn detach_children(&mut self, out: &mut Vec<Self>) {
        let placeholder = || Self::Literal(String::new());
        match self {
            Self::Literal(_) => {}
            Self::Paren(inner) | Self::Unary { operand: inner, .. } => {
                out.push(std::mem::replace(&mut **inner, placeholder()));
            }
            Self::Binary { left, right, .. } => {
                out.push(std::mem::replace(&mut **left, placeholder()));
                out.push(std::mem::replace(&mut **right, placeholder()));
            }
        }
    }
}

/// Fully parenthesized rendering, handy in logs and test failures.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Paren(inner) => write!(f, "{inner}"),
            Self::Unary { op, operand } => write!(f, "({op}{operand})"),
            Self::Binary { op, left, right } => write!(f, "({left} {op} {right})"),
        }
    }
}

/// Tear-down with an explicit stack, so dropping a deep tree never recurses.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}

//! Tree lowering: turns an [`Expr`] into a dependency-ordered list of binary
//! operations.
//!
//! The walk is post-order. Each node yields an operand token; unary and binary
//! nodes append one operation to the accumulator and yield a reference to it.
//! The left subtree is lowered completely before the right one starts, so a
//! reference always points at an operation already in the list.
//!
//! The traversal keeps its own work stack, so tree depth never touches the
//! thread stack. Once the operation limit is exceeded the walk keeps going
//! without allocating further operations, so a static error anywhere in the
//! tree still wins over `ExpressionTooComplex`.

use calculation_sdk::models::is_numeric_literal;
use calculation_sdk::{OperandToken, Operation, OperationType};
use tracing::trace;
use uuid::Uuid;

use crate::domain::ast::Expr;
use crate::domain::error::DomainError;
use crate::domain::limits::ComplexityLimits;

/// Result of lowering one expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lowered {
    pub operations: Vec<Operation>,
    /// Value of the whole tree: a reference to the last operation, or a
    /// literal when nothing was emitted.
    pub result: OperandToken,
}

/// Lowers `expr` into operations.
///
/// # Errors
///
/// * `InvalidExpression` - a literal node whose text is not a number
/// * `UnsupportedOperator` - an operator without an operation type
/// * `DivisionByZero` - a divisor that is the literal `0`
/// * `ExpressionTooComplex` - more operations than `limits` allow, reported
///   only after the whole tree was checked for the errors above
pub fn lower(expr: &Expr, limits: &ComplexityLimits) -> Result<Lowered, DomainError> {
    let mut emitter = Emitter {
        operations: Vec::new(),
        count: 0,
        limits,
    };
    let result = walk(expr, &mut emitter)?;
    limits.validate_operation_count(emitter.count)?;
    Ok(Lowered {
        operations: emitter.operations,
        result,
    })
}

enum Task<'e> {
    Visit(&'e Expr),
    Negate(char),
    Apply(char),
}

fn walk(root: &Expr, emitter: &mut Emitter<'_>) -> Result<OperandToken, DomainError> {
    let mut tasks = vec![Task::Visit(root)];
    let mut values: Vec<OperandToken> = Vec::new();

    while let Some(task) = tasks.pop() {
        match task {
            Task::Visit(Expr::Literal(text)) => {
                if !is_numeric_literal(text) {
                    return Err(DomainError::invalid_expression(format!(
                        "'{text}' is not a numeric literal"
                    )));
                }
                values.push(OperandToken::literal(text.as_str()));
            }
            Task::Visit(Expr::Paren(inner)) => tasks.push(Task::Visit(inner)),
            Task::Visit(Expr::Unary { op, operand }) => {
                tasks.push(Task::Negate(*op));
                tasks.push(Task::Visit(operand));
            }
            Task::Visit(Expr::Binary { op, left, right }) => {
                tasks.push(Task::Apply(*op));
                tasks.push(Task::Visit(right));
                tasks.push(Task::Visit(left));
            }
            Task::Negate(op) => {
                let operand = pop_value(&mut values)?;
                values.push(negate(op, operand, emitter)?);
            }
            Task::Apply(op) => {
                let right = pop_value(&mut values)?;
                let left = pop_value(&mut values)?;
                values.push(apply(op, left, right, emitter)?);
            }
        }
    }
    pop_value(&mut values)
}

fn pop_value(values: &mut Vec<OperandToken>) -> Result<OperandToken, DomainError> {
    values
        .pop()
        .ok_or_else(|| DomainError::invalid_expression("operator without an operand"))
}

fn negate(
    op: char,
    operand: OperandToken,
    emitter: &mut Emitter<'_>,
) -> Result<OperandToken, DomainError> {
    if op != '-' {
        return Err(DomainError::unsupported_operator(format!("unary {op}")));
    }
    if let Some(text) = operand.as_literal().filter(|t| is_numeric_literal(t)) {
        return Ok(OperandToken::literal(negate_literal(text)));
    }
    Ok(emitter.emit(
        OperationType::Subtraction,
        OperandToken::literal("0"),
        operand,
    ))
}

fn apply(
    op: char,
    left: OperandToken,
    right: OperandToken,
    emitter: &mut Emitter<'_>,
) -> Result<OperandToken, DomainError> {
    let operation_type = OperationType::from_symbol(op)
        .ok_or_else(|| DomainError::unsupported_operator(op.to_string()))?;
    if operation_type == OperationType::Division && right.is_zero_literal() {
        return Err(DomainError::DivisionByZero);
    }
    Ok(emitter.emit(operation_type, left, right))
}

/// Accumulator for emitted operations.
struct Emitter<'l> {
    operations: Vec<Operation>,
    count: usize,
    limits: &'l ComplexityLimits,
}

impl Emitter<'_> {
    fn emit(
        &mut self,
        operation_type: OperationType,
        operand1: OperandToken,
        operand2: OperandToken,
    ) -> OperandToken {
        self.count += 1;
        if !self.limits.allows(self.count) {
            // The call fails once the walk ends; only the count matters now.
            return OperandToken::reference(Uuid::nil());
        }
        let operation = Operation::new(operation_type, operand1, operand2);
        let id = operation.id;
        trace!(
            %id,
            %operation_type,
            operand1 = %operation.operand1,
            operand2 = %operation.operand2,
            "emitted operation"
        );
        self.operations.push(operation);
        OperandToken::reference(id)
    }
}

/// Flips the sign of a numeric literal's text. Zero keeps no sign.
fn negate_literal(text: &str) -> String {
    match text.strip_prefix('-') {
        Some(magnitude) => magnitude.to_owned(),
        None if text.bytes().all(|b| b == b'0' || b == b'.') => text.to_owned(),
        None => format!("-{text}"),
    }
}

#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

//! Common test utilities for calculation integration tests

use std::collections::HashMap;
use std::sync::Arc;

use calculation::domain::limits::ComplexityLimits;
use calculation::{CalculationConfig, DecompositionService};
use calculation_sdk::{OperandToken, Operation, OperationType};
use uuid::Uuid;

pub fn create_service() -> Arc<DecompositionService> {
    Arc::new(DecompositionService::new(&CalculationConfig::default()))
}

pub fn create_service_with_max_operations(max: i64) -> Arc<DecompositionService> {
    Arc::new(DecompositionService::with_limits(
        ComplexityLimits::new().with_max_operations(max),
    ))
}

/// Operand kind without the generated id, for structural comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Literal(String),
    /// Index of the referenced operation in the list.
    Reference(usize),
}

/// Describes a list by operation type and operand shape, replacing ids with
/// list positions so that two decompositions can be compared.
pub fn shapes(ops: &[Operation]) -> Vec<(OperationType, Shape, Shape)> {
    let positions: HashMap<Uuid, usize> =
        ops.iter().enumerate().map(|(i, op)| (op.id, i)).collect();
    let shape = |token: &OperandToken| match token {
        OperandToken::Literal(text) => Shape::Literal(text.clone()),
        OperandToken::Reference(id) => Shape::Reference(positions[id]),
    };
    ops.iter()
        .map(|op| (op.operation_type, shape(&op.operand1), shape(&op.operand2)))
        .collect()
}

/// Executes integer-only operations front to back, the way a worker pool
/// would, and returns the value of `result`.
pub fn execute_integers(ops: &[Operation], result: &OperandToken) -> i128 {
    let mut values: HashMap<Uuid, i128> = HashMap::new();
    let resolve = |values: &HashMap<Uuid, i128>, token: &OperandToken| match token {
        OperandToken::Literal(text) => text.parse::<i128>().unwrap(),
        OperandToken::Reference(id) => *values
            .get(id)
            .expect("reference resolved before its operation ran"),
    };
    for op in ops {
        let a = resolve(&values, &op.operand1);
        let b = resolve(&values, &op.operand2);
        let value = match op.operation_type {
            OperationType::Addition => a + b,
            OperationType::Subtraction => a - b,
            OperationType::Multiplication => a * b,
            OperationType::Division => a / b,
        };
        values.insert(op.id, value);
    }
    resolve(&values, result)
}

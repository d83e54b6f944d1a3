//! Domain error types for the Calculation module.

use calculation_sdk::CalculationError;
use thiserror::Error;

/// Domain-level errors for expression decomposition.
///
/// Every variant is terminal for the call that produced it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The input is blank after trimming.
    #[error("expression is empty")]
    EmptyExpression,

    /// The input does not follow the arithmetic grammar.
    #[error("invalid expression: {0}")]
    InvalidExpression(String),

    /// A parenthesized group is unbalanced or empty.
    #[error("invalid parenthesized expression: {0}")]
    InvalidParenExpression(String),

    /// A binary operator is missing an operand.
    #[error("invalid binary operation: {0}")]
    InvalidBinaryOperation(String),

    /// The operator parses but has no operation type.
    #[error("unsupported operator '{0}'")]
    UnsupportedOperator(String),

    /// The divisor is the literal `0`.
    #[error("division by zero")]
    DivisionByZero,

    /// A complexity limit was exceeded.
    #[error("expression too complex: {0}")]
    ExpressionTooComplex(String),
}

impl DomainError {
    /// Creates an `InvalidExpression` error.
    #[must_use]
    pub fn invalid_expression(message: impl Into<String>) -> Self {
        Self::InvalidExpression(message.into())
    }

    /// Creates an `InvalidParenExpression` error.
    #[must_use]
    pub fn invalid_paren(message: impl Into<String>) -> Self {
        Self::InvalidParenExpression(message.into())
    }

    /// Creates an `InvalidBinaryOperation` error.
    #[must_use]
    pub fn invalid_binary(message: impl Into<String>) -> Self {
        Self::InvalidBinaryOperation(message.into())
    }

    /// Creates an `UnsupportedOperator` error.
    #[must_use]
    pub fn unsupported_operator(op: impl Into<String>) -> Self {
        Self::UnsupportedOperator(op.into())
    }

    /// Creates an `ExpressionTooComplex` error.
    #[must_use]
    pub fn too_complex(message: impl Into<String>) -> Self {
        Self::ExpressionTooComplex(message.into())
    }

    /// Returns `true` for the grammar-level failures.
    #[must_use]
    pub const fn is_syntax_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidExpression(_)
                | Self::InvalidParenExpression(_)
                | Self::InvalidBinaryOperation(_)
        )
    }
}

impl From<DomainError> for CalculationError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::DivisionByZero => CalculationError::division_by_zero(),
            DomainError::ExpressionTooComplex(msg) => CalculationError::too_complex(msg),
            other @ (DomainError::EmptyExpression
            | DomainError::InvalidExpression(_)
            | DomainError::InvalidParenExpression(_)
            | DomainError::InvalidBinaryOperation(_)
            | DomainError::UnsupportedOperator(_)) => {
                CalculationError::invalid_expression(other.to_string())
            }
        }
    }
}

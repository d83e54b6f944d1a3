//! Public error types for the `calculation` module.
//!
//! These errors are safe to expose to other modules and consumers.

use thiserror::Error;

/// Errors that can be returned by the `CalculationApi`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculationError {
    /// The expression is blank, malformed, or uses an unsupported operator.
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),

    /// A divisor is the literal `0`.
    #[error("Division by zero")]
    DivisionByZero,

    /// The expression exceeds the configured complexity limits.
    #[error("Expression too complex: {0}")]
    ExpressionTooComplex(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CalculationError {
    /// Creates an `InvalidExpression` error.
    #[must_use]
    pub fn invalid_expression(message: impl Into<String>) -> Self {
        Self::InvalidExpression(message.into())
    }

    /// Creates a `DivisionByZero` error.
    #[must_use]
    pub const fn division_by_zero() -> Self {
        Self::DivisionByZero
    }

    /// Creates an `ExpressionTooComplex` error.
    #[must_use]
    pub fn too_complex(message: impl Into<String>) -> Self {
        Self::ExpressionTooComplex(message.into())
    }

    /// Creates an `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns `true` if this is an invalid expression error.
    #[must_use]
    pub const fn is_invalid_expression(&self) -> bool {
        matches!(self, Self::InvalidExpression(_))
    }

    /// Returns `true` if this is a division by zero error.
    #[must_use]
    pub const fn is_division_by_zero(&self) -> bool {
        matches!(self, Self::DivisionByZero)
    }

    /// Returns `true` if this is a complexity limit error.
    #[must_use]
    pub const fn is_too_complex(&self) -> bool {
        matches!(self, Self::ExpressionTooComplex(_))
    }
}

/// Failure to decode an operand token from its string form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenParseError {
    #[error("operand token is empty")]
    Empty,

    #[error("invalid operation reference '{0}'")]
    InvalidReference(String),

    #[error("invalid numeric literal '{0}'")]
    InvalidLiteral(String),
}

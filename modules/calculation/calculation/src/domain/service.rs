//! Domain service for the Calculation module.

use calculation_sdk::{Decomposition, Operation};
use tracing::{debug, warn};

use super::error::DomainError;
use super::limits::ComplexityLimits;
use super::lower::{Lowered, lower};
use super::parser;
use crate::config::CalculationConfig;

/// Domain service that compiles arithmetic expressions into operations.
///
/// The service is stateless apart from its limits, which are fixed at
/// construction, so a single instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct DecompositionService {
    limits: ComplexityLimits,
}

impl DecompositionService {
    /// Creates a new service from module configuration.
    #[must_use]
    pub fn new(config: &CalculationConfig) -> Self {
        Self::with_limits(config.limits())
    }

    /// Creates a new service with explicit limits.
    #[must_use]
    pub const fn with_limits(limits: ComplexityLimits) -> Self {
        Self { limits }
    }

    /// Effective maximum number of operations per expression.
    #[must_use]
    pub const fn max_operations(&self) -> usize {
        self.limits.max_operations
    }

    /// Checks that `expression` is well-formed without lowering it.
    ///
    /// # Errors
    ///
    /// Returns `EmptyExpression` or a syntax-class error.
    pub fn validate(&self, expression: &str) -> Result<(), DomainError> {
        parser::parse(expression).map(|_| ()).inspect_err(|e| {
            debug!(error = %e, syntax = e.is_syntax_error(), "expression rejected");
        })
    }

    /// Compiles `expression` into a dependency-ordered operation list.
    ///
    /// The list is empty when the expression reduces to a literal; use
    /// [`Self::decompose_with_result`] to get that literal.
    ///
    /// # Errors
    ///
    /// Any [`DomainError`]; no partial list is ever returned.
    pub fn decompose(&self, expression: &str) -> Result<Vec<Operation>, DomainError> {
        self.decompose_with_result(expression)
            .map(Decomposition::into_operations)
    }

    /// Compiles `expression` and also returns the token holding its value.
    ///
    /// # Errors
    ///
    /// Any [`DomainError`]; no partial list is ever returned.
    pub fn decompose_with_result(&self, expression: &str) -> Result<Decomposition, DomainError> {
        let expr = parser::parse(expression).inspect_err(|e| {
            debug!(error = %e, syntax = e.is_syntax_error(), "expression rejected");
        })?;

        let Lowered { operations, result } =
            lower(&expr, &self.limits).inspect_err(|e| match e {
                DomainError::ExpressionTooComplex(reason) => warn!(
                    %reason,
                    max_operations = self.limits.max_operations,
                    "expression exceeds operation limit"
                ),
                other => debug!(error = %other, "expression lowering failed"),
            })?;

        debug!(
            operations = operations.len(),
            constant = operations.is_empty(),
            "expression decomposed"
        );
        Ok(Decomposition { operations, result })
    }
}

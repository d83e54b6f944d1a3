//! `CalculationApi` trait definition.
//!
//! This trait defines the public API for the `calculation` module.

use async_trait::async_trait;

use crate::error::CalculationError;
use crate::models::Decomposition;

/// Public API trait for the `calculation` module.
///
/// ```ignore
/// let client = hub.get::<dyn CalculationApi>()?;
/// let decomposition = client.decompose("(1 + 2) * 3").await?;
/// ```
#[async_trait]
pub trait CalculationApi: Send + Sync {
    /// Check that `expression` is a well-formed arithmetic expression.
    ///
    /// # Errors
    ///
    /// * `InvalidExpression` - If the expression is blank or fails the grammar
    /// * `ExpressionTooComplex` - If the expression exceeds the input limits
    async fn validate(&self, expression: &str) -> Result<(), CalculationError>;

    /// Compile `expression` into a dependency-ordered list of binary operations.
    ///
    /// Every reference operand of the returned operations names an operation
    /// that appears strictly earlier in the list.
    ///
    /// # Errors
    ///
    /// * `InvalidExpression` - If the expression is blank, malformed, or uses
    ///   an unsupported operator
    /// * `DivisionByZero` - If a divisor is the literal `0`
    /// * `ExpressionTooComplex` - If the expression exceeds the configured limits
    async fn decompose(&self, expression: &str) -> Result<Decomposition, CalculationError>;
}

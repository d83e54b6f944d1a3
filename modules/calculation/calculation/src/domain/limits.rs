//! Complexity limits for expression decomposition
//!
//! The only cap is the number of operations one expression may emit. It is
//! checked once lowering has walked the whole tree, so every static error in
//! the input is reported ahead of it.

use crate::domain::error::DomainError;

pub const DEFAULT_MAX_OPERATIONS: usize = 100;

/// Limits guarding decomposition against pathological input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplexityLimits {
    /// Maximum operations per expression (default: 100)
    pub max_operations: usize,
}

impl Default for ComplexityLimits {
    fn default() -> Self {
        Self {
            max_operations: DEFAULT_MAX_OPERATIONS,
        }
    }
}

impl ComplexityLimits {
    /// Create limits with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum operations; values <= 0 select the default
    #[must_use]
    pub fn with_max_operations(mut self, max: i64) -> Self {
        self.max_operations = usize::try_from(max)
            .ok()
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_MAX_OPERATIONS);
        self
    }

    /// Returns `true` while `count` operations fit within the limit.
    #[must_use]
    pub const fn allows(&self, count: usize) -> bool {
        count <= self.max_operations
    }

    /// Validate the number of emitted operations
    ///
    /// # Errors
    /// Returns `ExpressionTooComplex` when more operations were emitted than allowed.
    pub fn validate_operation_count(&self, count: usize) -> Result<(), DomainError> {
        if !self.allows(count) {
            return Err(DomainError::too_complex(format!(
                "{count} operations exceed maximum of {}",
                self.max_operations
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        assert_eq!(ComplexityLimits::default().max_operations, 100);
    }

    #[test]
    fn test_non_positive_values_reset_to_default() {
        for max in [0, -5, i64::MIN] {
            let limits = ComplexityLimits::new().with_max_operations(max);
            assert_eq!(limits, ComplexityLimits::default());
        }
    }

    #[test]
    fn test_custom_limit() {
        let limits = ComplexityLimits::new().with_max_operations(3);
        assert_eq!(limits.max_operations, 3);
        assert!(limits.allows(3));
        assert!(!limits.allows(4));
    }

    #[test]
    fn test_validate_operation_count() {
        let limits = ComplexityLimits::new().with_max_operations(2);
        assert!(limits.validate_operation_count(0).is_ok());
        assert!(limits.validate_operation_count(2).is_ok());
        assert_eq!(
            limits.validate_operation_count(3),
            Err(DomainError::ExpressionTooComplex(
                "3 operations exceed maximum of 2".to_owned()
            ))
        );
    }
}

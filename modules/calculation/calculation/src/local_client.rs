//! Local client implementing the `CalculationApi` trait.

use std::sync::Arc;

use async_trait::async_trait;
use calculation_sdk::{CalculationApi, CalculationError, Decomposition};

use crate::domain::service::DecompositionService;

/// Local client for the Calculation module.
///
/// Delegates to the domain service in-process. Decomposition is synchronous
/// and CPU-bound, so the futures complete on first poll; callers that need a
/// deadline wrap the call on their side.
pub struct CalculationLocalClient {
    service: Arc<DecompositionService>,
}

impl CalculationLocalClient {
    /// Creates a new local client with the given service.
    #[must_use]
    pub fn new(service: Arc<DecompositionService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CalculationApi for CalculationLocalClient {
    async fn validate(&self, expression: &str) -> Result<(), CalculationError> {
        self.service
            .validate(expression)
            .map_err(CalculationError::from)
    }

    async fn decompose(&self, expression: &str) -> Result<Decomposition, CalculationError> {
        self.service
            .decompose_with_result(expression)
            .map_err(CalculationError::from)
    }
}

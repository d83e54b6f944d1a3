//! Verification of operation lists.
//!
//! Checks the ordering contract consumers rely on: ids are unique and every
//! reference names an operation that appears strictly earlier in the list.

use std::collections::{HashMap, HashSet};

use calculation_sdk::Operation;
use thiserror::Error;
use uuid::Uuid;

/// Structural violation found in an operation list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("operation id {id} at index {index} was already used at index {first}")]
    DuplicateId { id: Uuid, index: usize, first: usize },

    #[error("operation at index {index} references {reference}, which only appears later")]
    ForwardReference { index: usize, reference: Uuid },

    #[error("operation at index {index} references unknown operation {reference}")]
    UnknownReference { index: usize, reference: Uuid },
}

/// Verifies that `operations` is a valid topological ordering.
///
/// Returns the first violation found, or `Ok(())` when the list can be
/// executed front to back.
///
/// # Errors
///
/// Returns a [`VerifyError`] describing the first violation.
pub fn verify_operations(operations: &[Operation]) -> Result<(), VerifyError> {
    let all_ids: HashSet<Uuid> = operations.iter().map(|op| op.id).collect();
    let mut seen: HashMap<Uuid, usize> = HashMap::with_capacity(operations.len());

    for (index, operation) in operations.iter().enumerate() {
        for reference in operation.references() {
            if seen.contains_key(&reference) {
                continue;
            }
            return Err(if all_ids.contains(&reference) {
                VerifyError::ForwardReference { index, reference }
            } else {
                VerifyError::UnknownReference { index, reference }
            });
        }
        if let Some(first) = seen.insert(operation.id, index) {
            return Err(VerifyError::DuplicateId {
                id: operation.id,
                index,
                first,
            });
        }
    }
    Ok(())
}

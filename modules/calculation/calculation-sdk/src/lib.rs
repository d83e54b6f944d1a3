//! Calculation SDK
//!
//! This crate provides the public API for the `calculation` module:
//! - `CalculationApi` trait for inter-module communication
//! - `Operation` model, the unit of work handed to the execution layer
//! - `OperandToken`, the literal-or-reference operand encoding
//! - `CalculationError` for error handling
//!
//! ## Usage
//!
//! ```ignore
//! use calculation_sdk::CalculationApi;
//!
//! let decomposition = client.decompose("2 + 3 * 4").await?;
//!
//! // Attach the owning calculation once its record exists
//! let mut decomposition = decomposition;
//! decomposition.bind(calculation_id);
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod api;
pub mod error;
pub mod models;

// Re-export main types at crate root for convenience
pub use api::CalculationApi;
pub use error::{CalculationError, TokenParseError};
pub use models::{
    Decomposition, OperandToken, Operation, OperationStatus, OperationType, REFERENCE_PREFIX,
    set_calculation_id,
};

//! Calculation Module
//!
//! Compiles free-form infix arithmetic expressions into an ordered, acyclic
//! list of binary operations that a distributed execution layer can consume
//! one at a time.
//!
//! ## Architecture
//!
//! - `domain/parser.rs` - Tokenizer and recursive-descent parser (syntax validation)
//! - `domain/lower.rs` - Post-order lowering of the tree into operations
//! - `domain/limits.rs` - Complexity limits
//! - `domain/verify.rs` - Topological-order checks for operation lists
//! - `domain/service.rs` - Orchestration of the above
//! - `local_client.rs` - `CalculationApi` implementation over the service
//!
//! External consumers should use the `calculation-sdk` crate for the API
//! trait and models.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod config;
pub mod domain;
pub mod local_client;

pub use config::CalculationConfig;
pub use domain::{DecompositionService, DomainError};
pub use local_client::CalculationLocalClient;

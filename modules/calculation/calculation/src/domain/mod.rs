//! Domain layer for the calculation module
//!
//! Parsing, lowering, and the limits that guard them.

pub mod ast;
pub mod error;
pub mod limits;
pub mod lower;
pub mod parser;
pub mod service;
pub mod verify;

pub use error::DomainError;
pub use service::DecompositionService;

//! Public models for the `calculation` module.
//!
//! These are transport-agnostic data structures that define the contract
//! between the decomposition engine, the persistence layer, and the workers
//! that execute operations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TokenParseError;

/// Reserved prefix marking an operand token as a reference to another operation.
pub const REFERENCE_PREFIX: &str = "ref:";

/// The arithmetic performed by a single operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationType {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl OperationType {
    /// Maps an infix operator symbol to its operation type.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Addition),
            '-' => Some(Self::Subtraction),
            '*' => Some(Self::Multiplication),
            '/' => Some(Self::Division),
            _ => None,
        }
    }

    /// Returns the infix operator symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Addition => '+',
            Self::Subtraction => '-',
            Self::Multiplication => '*',
            Self::Division => '/',
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Addition => "Addition",
            Self::Subtraction => "Subtraction",
            Self::Multiplication => "Multiplication",
            Self::Division => "Division",
        };
        f.write_str(name)
    }
}

/// Lifecycle of an operation.
///
/// Decomposition only ever produces `Pending`; every other transition belongs
/// to the execution layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Failed,
}

/// An operation input: either a numeric literal or the future result of an
/// earlier operation.
///
/// The string form is the literal text verbatim, or [`REFERENCE_PREFIX`]
/// followed by the hyphenated id of the referenced operation. Decoding looks
/// at the prefix only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum OperandToken {
    Literal(String),
    Reference(Uuid),
}

impl OperandToken {
    /// Creates a literal token. The text is taken as-is.
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Creates a reference to the operation with the given id.
    #[must_use]
    pub const fn reference(id: Uuid) -> Self {
        Self::Reference(id)
    }

    /// Returns the literal text, if any.
    #[must_use]
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(text) => Some(text),
            Self::Reference(_) => None,
        }
    }

    /// Returns the referenced operation id, if any.
    #[must_use]
    pub const fn as_reference(&self) -> Option<Uuid> {
        match self {
            Self::Reference(id) => Some(*id),
            Self::Literal(_) => None,
        }
    }

    /// Returns `true` for the literal `0` exactly.
    #[must_use]
    pub fn is_zero_literal(&self) -> bool {
        self.as_literal() == Some("0")
    }
}

impl fmt::Display for OperandToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Reference(id) => write!(f, "{REFERENCE_PREFIX}{}", id.hyphenated()),
        }
    }
}

impl FromStr for OperandToken {
    type Err = TokenParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(TokenParseError::Empty);
        }
        if let Some(raw_id) = s.strip_prefix(REFERENCE_PREFIX) {
            return Uuid::parse_str(raw_id)
                .map(Self::Reference)
                .map_err(|_| TokenParseError::InvalidReference(s.to_owned()));
        }
        if is_numeric_literal(s) {
            Ok(Self::Literal(s.to_owned()))
        } else {
            Err(TokenParseError::InvalidLiteral(s.to_owned()))
        }
    }
}

impl From<OperandToken> for String {
    fn from(token: OperandToken) -> Self {
        token.to_string()
    }
}

impl TryFrom<String> for OperandToken {
    type Error = TokenParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Checks the literal shape `-?digits(.digits)?`.
#[must_use]
pub fn is_numeric_literal(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    all_digits(int_part) && frac_part.is_none_or(all_digits)
}

/// One atomic binary arithmetic step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Unique identifier, generated when the operation is emitted.
    pub id: Uuid,

    /// Owning calculation. Unset at decomposition time when the calculation
    /// record does not exist yet; see [`set_calculation_id`].
    pub calculation_id: Option<Uuid>,

    pub operation_type: OperationType,

    pub operand1: OperandToken,

    pub operand2: OperandToken,

    /// Owned by the execution layer after emission.
    pub status: OperationStatus,
}

impl Operation {
    /// Creates a pending, unbound operation with a fresh id.
    #[must_use]
    pub fn new(
        operation_type: OperationType,
        operand1: OperandToken,
        operand2: OperandToken,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            calculation_id: None,
            operation_type,
            operand1,
            operand2,
            status: OperationStatus::Pending,
        }
    }

    /// Ids of the operations this one depends on, in operand order.
    pub fn references(&self) -> impl Iterator<Item = Uuid> + '_ {
        [&self.operand1, &self.operand2]
            .into_iter()
            .filter_map(OperandToken::as_reference)
    }
}

/// Overwrites the calculation id of every operation in place.
pub fn set_calculation_id(operations: &mut [Operation], calculation_id: Uuid) {
    for operation in &mut *operations {
        operation.calculation_id = Some(calculation_id);
    }
}

/// Output of a decomposition: the ordered operations plus the token that
/// holds the value of the whole expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decomposition {
    pub operations: Vec<Operation>,

    /// A reference to the last operation, or a literal when the expression
    /// reduced to a constant and nothing was emitted.
    pub result: OperandToken,
}

impl Decomposition {
    /// Returns `true` when the expression folded to a literal without
    /// emitting any operation.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.operations.is_empty()
    }

    /// Backfills the owning calculation on every operation.
    pub fn bind(&mut self, calculation_id: Uuid) {
        set_calculation_id(&mut self.operations, calculation_id);
    }

    #[must_use]
    pub fn into_operations(self) -> Vec<Operation> {
        self.operations
    }
}

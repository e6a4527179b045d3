//! Error types for building criteria expressions
//!
//! These are raised while turning command-line tokens into a
//! `CriteriaExpression`, before any file is scanned. Problems inside a
//! criterion's value (e.g. `size 10:tb`) are not errors here; they make that
//! criterion evaluate to false at scan time.

use thiserror::Error;

/// Errors that can occur while building a criteria expression
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CriteriaError {
    /// Flag does not name a known criterion
    #[error("Unknown criterion '{0}'")]
    UnknownCriterion(String),

    /// Comparison operator is not one of eq, gt, gte, lt, lte
    #[error("Unknown comparison operator '{0}'")]
    UnknownComparison(String),

    /// Criterion flag given without a value
    #[error("Expected a value after -{0}")]
    MissingValue(String),

    /// Token is neither a criterion, a logical operator nor a value
    #[error("Unexpected argument '{0}'")]
    UnexpectedToken(String),

    /// Logical operator with no criterion after it
    #[error("Logical operator '{0}' must be followed by a criterion")]
    DanglingOperator(String),

    /// Two logical operators in a row
    #[error("Logical operator '{second}' cannot follow '{first}'")]
    ConsecutiveOperators { first: String, second: String },
}

//! Search criteria
//!
//! A search is an ordered chain of atomic criteria joined by AND/OR and
//! folded strictly left to right:
//!
//! ```text
//! vidsift /media -- -size gte 100:mb -o -container mkv -a -width gte 1920
//! ```
//!
//! reads as `((size >= 100 MiB) OR (container = mkv)) AND (width >= 1920)`.
//!
//! Numeric `eq` is approximate: it accepts values within 1% of the target.

pub mod error;
pub mod evaluator;
pub mod expression;
pub mod parser;
pub mod types;

pub use error::CriteriaError;
pub use types::{
    ComparisonOp, CriteriaExpression, Criterion, CriterionKind, EQ_TOLERANCE, LogicalOp,
};

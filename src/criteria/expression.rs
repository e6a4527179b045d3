//! Expression evaluation
//!
//! Criteria are folded strictly left to right with no precedence between
//! AND and OR: `A OR B AND C` is `(A OR B) AND C`.

use std::path::Path;

use super::evaluator;
use super::types::{Criterion, LogicalOp};
use crate::media::MediaRecord;

/// Fold `criteria` left to right. An empty chain matches everything.
#[must_use]
pub fn evaluate(record: &MediaRecord, path: &Path, criteria: &[Criterion]) -> bool {
    let Some((first, rest)) = criteria.split_first() else {
        return true;
    };

    let initial = evaluator::evaluate(record, path, first);
    rest.iter().fold(initial, |acc, criterion| {
        match criterion.preceding.unwrap_or(LogicalOp::And) {
            LogicalOp::And => acc && evaluator::evaluate(record, path, criterion),
            LogicalOp::Or => acc || evaluator::evaluate(record, path, criterion),
        }
    })
}

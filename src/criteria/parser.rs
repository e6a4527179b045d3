//! Command-line criteria parsing
//!
//! Grammar, one token per shell word:
//!
//! ```text
//! expression := [logical] criterion { [logical] criterion }
//! criterion  := -<kind> [op] <value>
//! logical    := -a | -and | -o | -or
//! op         := eq | gt | gte | lt | lte | = | > | >= | < | <=
//! ```
//!
//! An op word is only taken as an operator when another value follows it, so
//! `-filename gt` searches for files named like "gt".

use std::iter::Peekable;

use super::error::CriteriaError;
use super::types::{ComparisonOp, CriteriaExpression, Criterion, CriterionKind, LogicalOp};

enum Token<'a> {
    Logical(LogicalOp),
    Kind(CriterionKind),
    Value(&'a str),
}

fn classify(token: &str) -> Token<'_> {
    match token {
        "-a" | "-and" | "--and" => return Token::Logical(LogicalOp::And),
        "-o" | "-or" | "--or" => return Token::Logical(LogicalOp::Or),
        _ => {}
    }

    let flag = token.strip_prefix("--").or_else(|| token.strip_prefix('-'));
    match flag.map(CriterionKind::try_from) {
        Some(Ok(kind)) => Token::Kind(kind),
        _ => Token::Value(token),
    }
}

fn is_value(token: &&str) -> bool {
    matches!(classify(token), Token::Value(_))
}

impl CriteriaExpression {
    /// Build an expression from command-line tokens.
    ///
    /// # Examples
    /// ```
    /// use vidsift::criteria::CriteriaExpression;
    ///
    /// let expr = CriteriaExpression::from_args(["-size", "gte", "100:mb", "-o", "-container", "mkv"]).unwrap();
    /// assert_eq!(expr.len(), 2);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `CriteriaError` for an unknown criterion flag, a flag with no
    /// value, a stray value, or a logical operator that is doubled or not
    /// followed by a criterion.
    pub fn from_args<I, S>(args: I) -> Result<Self, CriteriaError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let mut tokens = args.iter().map(|arg| arg.as_ref()).peekable();

        let mut expression = Self::new();
        let mut pending: Option<(LogicalOp, &str)> = None;

        while let Some(token) = tokens.next() {
            match classify(token) {
                Token::Logical(op) => {
                    if let Some((_, first)) = pending {
                        return Err(CriteriaError::ConsecutiveOperators {
                            first: first.to_string(),
                            second: token.to_string(),
                        });
                    }
                    pending = Some((op, token));
                }
                Token::Kind(kind) => {
                    let mut criterion = parse_criterion(kind, &mut tokens)?;
                    criterion.preceding = pending.take().map(|(op, _)| op);
                    expression.push(criterion);
                }
                Token::Value(value) => {
                    return Err(match value.strip_prefix('-') {
                        Some(flag) if !flag.is_empty() => {
                            CriteriaError::UnknownCriterion(flag.trim_start_matches('-').to_string())
                        }
                        _ => CriteriaError::UnexpectedToken(value.to_string()),
                    });
                }
            }
        }

        if let Some((_, op)) = pending {
            return Err(CriteriaError::DanglingOperator(op.to_string()));
        }

        Ok(expression)
    }
}

fn parse_criterion<'a, I>(
    kind: CriterionKind,
    tokens: &mut Peekable<I>,
) -> Result<Criterion, CriteriaError>
where
    I: Iterator<Item = &'a str>,
{
    let first = tokens
        .next_if(is_value)
        .ok_or_else(|| CriteriaError::MissingValue(kind.name().to_string()))?;

    if let Ok(op) = ComparisonOp::try_from(first) {
        if let Some(value) = tokens.next_if(is_value) {
            return Ok(Criterion::new(kind, value).with_op(op));
        }
    }

    Ok(Criterion::new(kind, first))
}

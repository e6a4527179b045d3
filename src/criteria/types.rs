//! Criteria data structures
//!
//! - `CriterionKind`: which attribute of a file a criterion looks at
//! - `ComparisonOp`: how numeric attributes are compared
//! - `LogicalOp`: how a criterion joins the result accumulated so far
//! - `Criterion`: one atomic predicate
//! - `CriteriaExpression`: the ordered, left-to-right chain of criteria

use std::fmt;
use std::path::Path;

use super::error::CriteriaError;
use crate::media::MediaRecord;

/// Relative tolerance applied by `ComparisonOp::Eq`
pub const EQ_TOLERANCE: f64 = 0.01;

/// Attribute a criterion is evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CriterionKind {
    Path,
    Filename,
    Container,
    Duration,
    Size,
    Bitrate,
    CodecName,
    CodecTag,
    Aspect,
    Width,
    Height,
    Orientation,
    PixFmt,
    Framerate,
}

impl CriterionKind {
    /// Every kind, in the order they are listed in help output
    pub const ALL: [Self; 14] = [
        Self::Path,
        Self::Filename,
        Self::Container,
        Self::Duration,
        Self::Size,
        Self::Bitrate,
        Self::CodecName,
        Self::CodecTag,
        Self::Aspect,
        Self::Width,
        Self::Height,
        Self::Orientation,
        Self::PixFmt,
        Self::Framerate,
    ];

    /// Canonical name, as used for the command-line flag
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Filename => "filename",
            Self::Container => "container",
            Self::Duration => "duration",
            Self::Size => "size",
            Self::Bitrate => "bitrate",
            Self::CodecName => "codec_name",
            Self::CodecTag => "codec_tag",
            Self::Aspect => "aspect",
            Self::Width => "width",
            Self::Height => "height",
            Self::Orientation => "orientation",
            Self::PixFmt => "pix_fmt",
            Self::Framerate => "framerate",
        }
    }

    /// Whether the kind reads the video stream (false when there is none)
    #[must_use]
    pub const fn needs_video_stream(self) -> bool {
        matches!(
            self,
            Self::CodecName
                | Self::CodecTag
                | Self::Aspect
                | Self::Width
                | Self::Height
                | Self::Orientation
                | Self::PixFmt
                | Self::Framerate
        )
    }

    /// Whether the comparison operator is honoured for this kind.
    /// String kinds always use substring or equality semantics.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Duration
                | Self::Size
                | Self::Bitrate
                | Self::Width
                | Self::Height
                | Self::Framerate
        )
    }
}

impl TryFrom<&str> for CriterionKind {
    type Error = CriteriaError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().replace('-', "_").as_str() {
            "path" | "dir" => Ok(Self::Path),
            "filename" | "name" => Ok(Self::Filename),
            "container" | "ext" => Ok(Self::Container),
            "duration" => Ok(Self::Duration),
            "size" => Ok(Self::Size),
            "bitrate" => Ok(Self::Bitrate),
            "codec_name" | "codec" => Ok(Self::CodecName),
            "codec_tag" => Ok(Self::CodecTag),
            "aspect" => Ok(Self::Aspect),
            "width" => Ok(Self::Width),
            "height" => Ok(Self::Height),
            "orientation" => Ok(Self::Orientation),
            "pix_fmt" | "pixfmt" => Ok(Self::PixFmt),
            "framerate" | "fps" => Ok(Self::Framerate),
            _ => Err(CriteriaError::UnknownCriterion(value.to_string())),
        }
    }
}

impl fmt::Display for CriterionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Comparison applied to numeric criteria
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComparisonOp {
    /// Approximately equal, within `EQ_TOLERANCE` of the target
    #[default]
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl ComparisonOp {
    /// Compare an observed value against the criterion target
    #[must_use]
    pub fn compare(self, actual: f64, target: f64) -> bool {
        match self {
            Self::Eq => (actual - target).abs() <= target.abs() * EQ_TOLERANCE,
            Self::Gt => actual > target,
            Self::Gte => actual >= target,
            Self::Lt => actual < target,
            Self::Lte => actual <= target,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
        }
    }
}

impl TryFrom<&str> for ComparisonOp {
    type Error = CriteriaError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "eq" | "=" | "==" => Ok(Self::Eq),
            "gt" | ">" => Ok(Self::Gt),
            "gte" | "ge" | ">=" => Ok(Self::Gte),
            "lt" | "<" => Ok(Self::Lt),
            "lte" | "le" | "<=" => Ok(Self::Lte),
            _ => Err(CriteriaError::UnknownComparison(value.to_string())),
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a criterion is joined to the result accumulated before it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => f.write_str("AND"),
            Self::Or => f.write_str("OR"),
        }
    }
}

/// One atomic predicate over a file's path or metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criterion {
    pub kind: CriterionKind,
    pub op: ComparisonOp,
    /// Raw user value, interpreted per kind at evaluation time
    pub value: String,
    /// Join with the previous result; `None` means AND (and is ignored on
    /// the first criterion)
    pub preceding: Option<LogicalOp>,
}

impl Criterion {
    /// Create a criterion with the default `eq` comparison and no logical
    /// operator
    #[must_use]
    pub fn new(kind: CriterionKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            op: ComparisonOp::default(),
            value: value.into(),
            preceding: None,
        }
    }

    /// Set the comparison operator
    #[must_use]
    pub const fn with_op(mut self, op: ComparisonOp) -> Self {
        self.op = op;
        self
    }

    /// Set how this criterion joins the preceding result
    #[must_use]
    pub const fn joined_by(mut self, op: LogicalOp) -> Self {
        self.preceding = Some(op);
        self
    }

    /// Evaluate against one file. See [`crate::criteria::evaluator`].
    #[must_use]
    pub fn matches(&self, record: &MediaRecord, path: &Path) -> bool {
        super::evaluator::evaluate(record, path, self)
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.is_numeric() {
            write!(f, "{} {} {}", self.kind, self.op, self.value)
        } else {
            write!(f, "{} {:?}", self.kind, self.value)
        }
    }
}

/// Ordered chain of criteria, folded strictly left to right
///
/// Built once before scanning and shared read-only by every worker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriteriaExpression {
    criteria: Vec<Criterion>,
}

impl CriteriaExpression {
    /// An empty expression, which matches every file
    #[must_use]
    pub const fn new() -> Self {
        Self {
            criteria: Vec::new(),
        }
    }

    /// Append a criterion
    pub fn push(&mut self, criterion: Criterion) {
        self.criteria.push(criterion);
    }

    /// Append a criterion, builder style
    #[must_use]
    pub fn with(mut self, criterion: Criterion) -> Self {
        self.push(criterion);
        self
    }

    #[must_use]
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Evaluate the whole chain against one file.
    /// See [`crate::criteria::expression`].
    #[must_use]
    pub fn matches(&self, record: &MediaRecord, path: &Path) -> bool {
        super::expression::evaluate(record, path, &self.criteria)
    }
}

impl From<Vec<Criterion>> for CriteriaExpression {
    fn from(criteria: Vec<Criterion>) -> Self {
        Self { criteria }
    }
}

impl FromIterator<Criterion> for CriteriaExpression {
    fn from_iter<I: IntoIterator<Item = Criterion>>(iter: I) -> Self {
        Self {
            criteria: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for CriteriaExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.criteria.is_empty() {
            return f.write_str("(match all)");
        }
        for (i, criterion) in self.criteria.iter().enumerate() {
            if i > 0 {
                let op = criterion.preceding.unwrap_or(LogicalOp::And);
                write!(f, " {op} ")?;
            }
            write!(f, "[{criterion}]")?;
        }
        Ok(())
    }
}

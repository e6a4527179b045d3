//! Per-file scan outcomes

use std::fmt;
use std::path::{Path, PathBuf};

/// Why a file was not matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Extension is not a recognised video container; never probed
    NotVideo,
    /// The probe ran but its output was unusable
    MetadataUnavailable,
    /// Metadata was read but the expression evaluated false
    CriteriaNotMet,
}

impl SkipReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotVideo => "not a video extension",
            Self::MetadataUnavailable => "metadata unavailable",
            Self::CriteriaNotMet => "criteria not met",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome for one scanned file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Matched(PathBuf),
    Skipped(PathBuf, SkipReason),
    /// The fetch failed unexpectedly (or the worker panicked)
    Failed(PathBuf, String),
}

impl MatchResult {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Matched(path) | Self::Skipped(path, _) | Self::Failed(path, _) => path,
        }
    }

    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Matched(_))
    }
}

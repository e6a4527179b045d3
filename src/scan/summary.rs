//! Result aggregation

use std::path::PathBuf;
use std::time::Duration;

use super::result::{MatchResult, SkipReason};

/// Aggregate outcome of a scan.
///
/// Filled by a single consumer draining the result channel, so it needs no
/// locking. `matched` keeps completion order and is not sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub matched: Vec<PathBuf>,
    pub skipped: Vec<(PathBuf, SkipReason)>,
    pub failed: Vec<(PathBuf, String)>,
    pub elapsed: Duration,
    /// True when the scan was stopped through its `CancelHandle`
    pub cancelled: bool,
}

impl ScanSummary {
    /// Fold one result into the aggregate
    pub fn record(&mut self, result: MatchResult) {
        match result {
            MatchResult::Matched(path) => self.matched.push(path),
            MatchResult::Skipped(path, reason) => self.skipped.push((path, reason)),
            MatchResult::Failed(path, error) => self.failed.push((path, error)),
        }
    }

    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// Number of files skipped for `reason`
    #[must_use]
    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped.iter().filter(|(_, r)| *r == reason).count()
    }

    /// Every file that produced a result
    #[must_use]
    pub fn total(&self) -> usize {
        self.matched_count() + self.skipped_count() + self.failed_count()
    }
}

impl FromIterator<MatchResult> for ScanSummary {
    fn from_iter<I: IntoIterator<Item = MatchResult>>(iter: I) -> Self {
        let mut summary = Self::default();
        for result in iter {
            summary.record(result);
        }
        summary
    }
}

//! Scan dispatcher
//!
//! The directory walk runs sequentially on a producer thread. Files without a
//! video extension are reported straight away; every other file becomes one
//! task on a fixed-size rayon pool, so at most `concurrency` probes run at a
//! time. All results flow through one crossbeam channel and are drained by
//! the calling thread, which is the only writer of the `ScanSummary`.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crossbeam::channel::{Sender, unbounded};
use rayon::ThreadPool;
use walkdir::WalkDir;

use super::cancel::CancelHandle;
use super::error::ScanError;
use super::result::{MatchResult, SkipReason};
use super::summary::ScanSummary;
use crate::criteria::CriteriaExpression;
use crate::media::{FetchOutcome, MetadataFetcher, VideoExtensionClassifier};

/// Scan settings
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Maximum number of concurrent metadata fetches
    pub concurrency: usize,
    pub classifier: VideoExtensionClassifier,
    pub follow_links: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            concurrency: num_cpus::get(),
            classifier: VideoExtensionClassifier::default(),
            follow_links: false,
        }
    }
}

impl ScanOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: VideoExtensionClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    #[must_use]
    pub const fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }
}

/// Walks a directory tree and evaluates a criteria expression against every
/// video file in it
pub struct Scanner {
    options: ScanOptions,
    fetcher: Arc<dyn MetadataFetcher>,
    cancel: CancelHandle,
}

impl Scanner {
    /// Create a scanner.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::InvalidConcurrency` if `options.concurrency` is 0.
    pub fn new(fetcher: Arc<dyn MetadataFetcher>, options: ScanOptions) -> Result<Self, ScanError> {
        if options.concurrency == 0 {
            return Err(ScanError::InvalidConcurrency(options.concurrency));
        }

        Ok(Self {
            options,
            fetcher,
            cancel: CancelHandle::new(),
        })
    }

    #[must_use]
    pub const fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Handle that stops this scanner's scans when cancelled
    #[must_use]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Scan `root` and return the aggregate outcome.
    ///
    /// # Errors
    ///
    /// See [`Scanner::scan_with`].
    pub fn scan(&self, root: &Path, expression: &CriteriaExpression) -> Result<ScanSummary, ScanError> {
        self.scan_with(root, expression, |_| {})
    }

    /// Scan `root`, calling `on_result` for every file as its result arrives.
    ///
    /// Results arrive in completion order. `on_result` runs on the calling
    /// thread.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::NotADirectory` if `root` is not a directory, or an
    /// error if the worker pool cannot be started. Per-file problems are
    /// reported as `MatchResult::Failed` instead.
    pub fn scan_with<F>(
        &self,
        root: &Path,
        expression: &CriteriaExpression,
        mut on_result: F,
    ) -> Result<ScanSummary, ScanError>
    where
        F: FnMut(&MatchResult),
    {
        if !root.is_dir() {
            return Err(ScanError::NotADirectory(root.to_path_buf()));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.concurrency)
            .thread_name(|i| format!("vidsift-probe-{i}"))
            .build()?;

        tracing::info!(
            "Scanning {} with {} workers: {expression}",
            root.display(),
            self.options.concurrency
        );

        let started = Instant::now();
        let (result_tx, result_rx) = unbounded::<MatchResult>();
        let mut summary = ScanSummary::default();
        let pool = &pool;

        crossbeam::thread::scope(|s| {
            s.spawn(move |_| self.dispatch(root, expression, pool, &result_tx));

            // Ends once the producer and every task have dropped their senders
            for result in &result_rx {
                tracing::debug!("{}: {:?}", result.path().display(), result);
                on_result(&result);
                summary.record(result);
            }
        })
        .map_err(|_| ScanError::DispatcherPanicked)?;

        summary.elapsed = started.elapsed();
        summary.cancelled = self.cancel.is_cancelled();

        tracing::info!(
            "Scan finished in {:.2}s: {} matched, {} skipped, {} failed",
            summary.elapsed.as_secs_f64(),
            summary.matched_count(),
            summary.skipped_count(),
            summary.failed_count()
        );

        Ok(summary)
    }

    /// Walk `root` and schedule one task per video file. Returns once every
    /// scheduled task has finished.
    fn dispatch(
        &self,
        root: &Path,
        expression: &CriteriaExpression,
        pool: &ThreadPool,
        results: &Sender<MatchResult>,
    ) {
        pool.in_place_scope(|scope| {
            let walker = WalkDir::new(root).follow_links(self.options.follow_links);

            for entry in walker {
                if self.cancel.is_cancelled() {
                    tracing::debug!("Scan cancelled, stopping directory walk");
                    break;
                }

                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        tracing::warn!("Walk error: {e}");
                        continue;
                    }
                };

                // Without follow_links a symlink reports its own type, so
                // look through it to the target
                let is_file = if entry.path_is_symlink() {
                    entry.path().is_file()
                } else {
                    entry.file_type().is_file()
                };
                if !is_file {
                    if entry.path_is_symlink() && !entry.path().exists() {
                        tracing::debug!("Ignoring broken symlink: {}", entry.path().display());
                    }
                    continue;
                }

                let path = entry.into_path();
                if !self.options.classifier.is_video(&path) {
                    if self.options.classifier.is_partial(&path) {
                        tracing::debug!("Partial download, not scanned: {}", path.display());
                    }
                    let _ = results.send(MatchResult::Skipped(path, SkipReason::NotVideo));
                    continue;
                }

                let results = results.clone();
                scope.spawn(move |_| {
                    if self.cancel.is_cancelled() {
                        return;
                    }
                    let _ = results.send(self.process_isolated(path, expression));
                });
            }
        });
    }

    /// Run `process`, turning a panic into `MatchResult::Failed`
    fn process_isolated(&self, path: PathBuf, expression: &CriteriaExpression) -> MatchResult {
        panic::catch_unwind(AssertUnwindSafe(|| self.process(&path, expression))).unwrap_or_else(
            |payload| {
                let message = panic_message(payload.as_ref());
                tracing::error!("Worker panicked on {}: {message}", path.display());
                MatchResult::Failed(path, format!("worker panicked: {message}"))
            },
        )
    }

    /// Fetch metadata for one file and evaluate the expression against it
    fn process(&self, path: &Path, expression: &CriteriaExpression) -> MatchResult {
        let record = match self.fetcher.fetch(path) {
            Ok(FetchOutcome::Record(record)) => record,
            Ok(FetchOutcome::Unusable(reason)) => {
                tracing::warn!("Skipping file due to problematic metadata: {} ({reason})", path.display());
                return MatchResult::Skipped(path.to_path_buf(), SkipReason::MetadataUnavailable);
            }
            Err(e) => {
                tracing::error!("Failed to fetch metadata for {}: {e}", path.display());
                return MatchResult::Failed(path.to_path_buf(), e.to_string());
            }
        };

        if expression.matches(&record, path) {
            MatchResult::Matched(path.to_path_buf())
        } else {
            MatchResult::Skipped(path.to_path_buf(), SkipReason::CriteriaNotMet)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

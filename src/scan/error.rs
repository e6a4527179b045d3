use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a scan before (or instead of) producing a summary.
/// Per-file problems never surface here; they become `MatchResult`s.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Root path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Concurrency must be at least 1, got {0}")]
    InvalidConcurrency(usize),

    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Scan dispatcher terminated unexpectedly")]
    DispatcherPanicked,
}

//! Concurrent scan pipeline
//!
//! `Scanner` walks a directory, hands each video file to a bounded worker
//! pool for metadata fetching and criteria evaluation, and aggregates the
//! per-file `MatchResult`s into a `ScanSummary`.

pub mod cancel;
pub mod dispatcher;
pub mod error;
pub mod result;
pub mod summary;

pub use cancel::CancelHandle;
pub use dispatcher::{ScanOptions, Scanner};
pub use error::ScanError;
pub use result::{MatchResult, SkipReason};
pub use summary::ScanSummary;

//! Vidsift - find video files by their metadata
//!
//! This library walks a directory tree, probes every video file it finds and
//! keeps the ones matching a left-to-right chain of criteria such as
//! `size gte 100:mb OR container mkv`.
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use vidsift::criteria::CriteriaExpression;
//! use vidsift::media::FfprobeFetcher;
//! use vidsift::scan::{ScanOptions, Scanner};
//!
//! let expression = CriteriaExpression::from_args(["-height", "gte", "1080"]).unwrap();
//! let scanner = Scanner::new(Arc::new(FfprobeFetcher::default()), ScanOptions::new()).unwrap();
//! let summary = scanner.scan(Path::new("/media"), &expression).unwrap();
//! for path in &summary.matched {
//!     println!("{}", path.display());
//! }
//! ```

use thiserror::Error;

pub mod cli;
pub mod config;
pub mod criteria;
pub mod media;
pub mod output;
pub mod scan;
pub mod units;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum VidsiftError {
    /// Invalid search criteria
    #[error("Invalid criteria: {0}")]
    CriteriaError(#[from] criteria::CriteriaError),
    /// Scan could not start or run
    #[error("{0}")]
    ScanError(#[from] scan::ScanError),
    /// Writing results failed
    #[error("{0}")]
    OutputError(#[from] output::OutputError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
}

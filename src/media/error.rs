//! Error types for metadata probing
//!
//! Two failure families are kept apart on purpose:
//!
//! - **`Unusable`**: the probe ran but its output cannot be used for this
//!   file. The file is skipped.
//! - **`FetchError`**: the probe could not be run at all. The file is reported
//!   as failed.

use std::io;
use thiserror::Error;

/// Reasons a probe result cannot be turned into a `MediaRecord`
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Unusable {
    /// The probe process exited unsuccessfully
    #[error("probe exited with {status}: {stderr}")]
    ProbeExit { status: String, stderr: String },

    /// The probe wrote nothing to stdout
    #[error("probe returned no output")]
    EmptyOutput,

    /// The output was not valid probe JSON
    #[error("malformed probe output: {0}")]
    Malformed(String),

    /// The `format` block is missing or empty
    #[error("no format information in probe output")]
    MissingFormat,

    /// The `streams` list is missing or empty
    #[error("no streams found in probe output")]
    MissingStreams,
}

/// Unexpected failures while fetching metadata
#[derive(Debug, Error)]
pub enum FetchError {
    /// The probe binary could not be started
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Any other failure raised by a fetcher implementation
    #[error("{0}")]
    Other(String),
}

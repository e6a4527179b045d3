//! Metadata fetching
//!
//! The scanner only knows the `MetadataFetcher` trait. `FfprobeFetcher` is the
//! production implementation; tests plug in an in-memory fetcher instead.

use std::path::Path;
use std::process::Command;

use super::error::{FetchError, Unusable};
use super::record::MediaRecord;

/// Result of a successful fetch attempt
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Metadata was read and decoded
    Record(MediaRecord),
    /// The probe ran but produced nothing usable for this file
    Unusable(Unusable),
}

/// Source of per-file metadata
///
/// Implementations are called concurrently from the scan worker pool and must
/// not retry: one `Unusable` outcome is final for that file.
pub trait MetadataFetcher: Send + Sync {
    /// Fetch metadata for `path`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` only for unexpected failures, such as the probe
    /// binary not being runnable. Bad or missing metadata is reported as
    /// `FetchOutcome::Unusable`.
    fn fetch(&self, path: &Path) -> Result<FetchOutcome, FetchError>;
}

/// Fetches metadata by running `ffprobe` and decoding its JSON output
#[derive(Debug, Clone)]
pub struct FfprobeFetcher {
    program: String,
}

impl FfprobeFetcher {
    /// Create a fetcher that runs `program` (usually `"ffprobe"`)
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The probe program this fetcher runs
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for FfprobeFetcher {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

impl MetadataFetcher for FfprobeFetcher {
    fn fetch(&self, path: &Path) -> Result<FetchOutcome, FetchError> {
        tracing::trace!("Probing {}", path.display());

        let output = Command::new(&self.program)
            .args(["-v", "error", "-print_format", "json", "-show_format", "-show_streams"])
            .arg(path)
            .output()
            .map_err(|source| FetchError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Ok(FetchOutcome::Unusable(Unusable::ProbeExit {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }));
        }

        Ok(match MediaRecord::from_probe_json(&output.stdout) {
            Ok(record) => FetchOutcome::Record(record),
            Err(reason) => FetchOutcome::Unusable(reason),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_program_is_ffprobe() {
        assert_eq!(FfprobeFetcher::default().program(), "ffprobe");
    }

    #[test]
    fn test_missing_binary_is_a_fetch_error() {
        let fetcher = FfprobeFetcher::new("vidsift-no-such-probe-binary");
        let result = fetcher.fetch(Path::new("movie.mp4"));
        assert!(matches!(result, Err(FetchError::Spawn { ref program, .. }) if program == "vidsift-no-such-probe-binary"));
    }
}

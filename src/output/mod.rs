//! Result output
//!
//! Matches are handed to one or more `ResultSink`s as the scan produces
//! them:
//!
//! - `ConsoleSink` prints `File: "<path>"` lines and a closing summary
//! - `FileListSink` writes one quoted path per line to a file list

pub mod console;
pub mod error;
pub mod filelist;

pub use console::ConsoleSink;
pub use error::OutputError;
pub use filelist::{FileListSink, resolve_filelist_path};

use std::path::Path;

use crate::scan::ScanSummary;

/// Consumer of scan matches
pub trait ResultSink {
    /// Handle one matched file.
    ///
    /// # Errors
    /// Returns `OutputError` if the match cannot be written.
    fn record_match(&mut self, path: &Path) -> Result<(), OutputError>;

    /// Called once after the scan has finished.
    ///
    /// # Errors
    /// Returns `OutputError` if flushing or reporting fails.
    fn finish(&mut self, summary: &ScanSummary) -> Result<(), OutputError>;
}

/// Format a path for output: newlines removed, surrounding whitespace
/// trimmed, wrapped in double quotes
#[must_use]
pub fn quote_path(path: &Path) -> String {
    let raw = path.to_string_lossy().replace('\n', "");
    format!("\"{}\"", raw.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_path() {
        assert_eq!(quote_path(Path::new("/media/movie.mp4")), r#""/media/movie.mp4""#);
        assert_eq!(quote_path(Path::new("/media/my movie.mkv")), r#""/media/my movie.mkv""#);
        assert_eq!(quote_path(Path::new("/media/odd\nname.mp4 ")), r#""/media/oddname.mp4""#);
    }
}

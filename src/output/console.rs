use colored::Colorize;
use std::io::{self, Write};
use std::path::Path;

use super::{OutputError, ResultSink, quote_path};
use crate::scan::ScanSummary;

/// Prints matches to a terminal (or any writer)
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use vidsift::output::{ConsoleSink, ResultSink};
///
/// let mut sink = ConsoleSink::with_writer(Vec::new(), false, false);
/// sink.record_match(Path::new("/media/movie.mp4")).unwrap();
/// assert_eq!(sink.into_inner(), b"File: \"/media/movie.mp4\"\n");
/// ```
pub struct ConsoleSink<W: Write = io::Stdout> {
    out: W,
    quiet: bool,
    color: bool,
}

impl ConsoleSink {
    /// Console sink on stdout, colored
    #[must_use]
    pub fn stdout(quiet: bool) -> Self {
        Self::with_writer(io::stdout(), quiet, true)
    }
}

impl<W: Write> ConsoleSink<W> {
    /// In quiet mode only the quoted paths are written, with no prefix and
    /// no summary
    #[must_use]
    pub const fn with_writer(out: W, quiet: bool, color: bool) -> Self {
        Self { out, quiet, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn summary_line(&self, summary: &ScanSummary) -> String {
        let matched = format!("{} matched", summary.matched_count());
        let failed = format!("{} failed", summary.failed_count());
        let (matched, failed) = if self.color {
            let failed = if summary.failed_count() > 0 {
                failed.red().to_string()
            } else {
                failed
            };
            (matched.green().bold().to_string(), failed)
        } else {
            (matched, failed)
        };

        let mut line = format!(
            "{matched}, {} skipped, {failed} ({} files in {:.2}s)",
            summary.skipped_count(),
            summary.total(),
            summary.elapsed.as_secs_f64()
        );
        if summary.cancelled {
            line.push_str(" [cancelled]");
        }
        line
    }
}

impl<W: Write> ResultSink for ConsoleSink<W> {
    fn record_match(&mut self, path: &Path) -> Result<(), OutputError> {
        let quoted = quote_path(path);
        if self.quiet {
            writeln!(self.out, "{quoted}")?;
        } else if self.color {
            writeln!(self.out, "{} {}", "File:".cyan(), quoted.green())?;
        } else {
            writeln!(self.out, "File: {quoted}")?;
        }
        Ok(())
    }

    fn finish(&mut self, summary: &ScanSummary) -> Result<(), OutputError> {
        if !self.quiet {
            let line = self.summary_line(summary);
            writeln!(self.out, "{}", if self.color { line.dimmed().to_string() } else { line })?;
        }
        self.out.flush()?;
        Ok(())
    }
}

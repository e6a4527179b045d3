//! File list output
//!
//! A file list holds one quoted path per line, ready for tools that read
//! playlists or batch inputs.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::{OutputError, ResultSink, quote_path};
use crate::scan::ScanSummary;

/// Where `--filelist` writes.
///
/// - no value: `default_dir/default_name`
/// - an existing directory, or a value ending in a path separator: that
///   directory joined with `default_name`
/// - anything else: the value itself
#[must_use]
pub fn resolve_filelist_path(value: Option<&str>, default_dir: &Path, default_name: &str) -> PathBuf {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => default_dir.join(default_name),
        Some(v) if v.ends_with(std::path::MAIN_SEPARATOR) || v.ends_with('/') => {
            Path::new(v).join(default_name)
        }
        Some(v) if Path::new(v).is_dir() => Path::new(v).join(default_name),
        Some(v) => PathBuf::from(v),
    }
}

/// Writes matches to a file list
pub struct FileListSink {
    path: PathBuf,
    writer: BufWriter<File>,
    written: usize,
}

impl FileListSink {
    /// Open (and truncate, unless `append`) the file list at `path`,
    /// creating missing parent directories.
    ///
    /// # Errors
    /// Returns `OutputError::Open` if the directory or file cannot be created.
    pub fn create(path: impl Into<PathBuf>, append: bool) -> Result<Self, OutputError> {
        let path = path.into();
        let open_error = |source| OutputError::Open {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(open_error)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(&path)
            .map_err(open_error)?;

        tracing::debug!(
            "Opened file list {} ({})",
            path.display(),
            if append { "append" } else { "truncate" }
        );

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, source: std::io::Error) -> OutputError {
        OutputError::FileList {
            path: self.path.clone(),
            source,
        }
    }
}

impl ResultSink for FileListSink {
    fn record_match(&mut self, path: &Path) -> Result<(), OutputError> {
        writeln!(self.writer, "{}", quote_path(path)).map_err(|e| self.write_error(e))?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self, _summary: &ScanSummary) -> Result<(), OutputError> {
        self.writer.flush().map_err(|e| self.write_error(e))?;
        tracing::info!("Wrote {} paths to {}", self.written, self.path.display());
        eprintln!("Output to Filelist: {}", self.path.display());
        Ok(())
    }
}

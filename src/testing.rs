//! Testing utilities for vidsift
//!
//! This module provides a `StaticFetcher` that serves canned metadata by file
//! name, so scans can be tested without a probe binary, plus helpers for
//! laying out fixture trees.
//!
//! Only available when compiled with `cfg(test)`.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::media::{FetchError, FetchOutcome, MediaRecord, MetadataFetcher, Unusable};

#[derive(Debug, Clone)]
enum Canned {
    Record(MediaRecord),
    Unusable,
    Failure(String),
    Panic,
}

/// In-memory `MetadataFetcher` keyed by file name
///
/// Files with no canned entry are reported as unusable. Every call is
/// counted and the probed paths are kept for assertions.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    entries: HashMap<String, Canned>,
    calls: AtomicUsize,
    probed: Mutex<Vec<PathBuf>>,
}

impl StaticFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `record` for files named `name`
    #[must_use]
    pub fn with_record(mut self, name: &str, record: MediaRecord) -> Self {
        self.entries.insert(name.to_string(), Canned::Record(record));
        self
    }

    /// Report unusable metadata for files named `name`
    #[must_use]
    pub fn with_unusable(mut self, name: &str) -> Self {
        self.entries.insert(name.to_string(), Canned::Unusable);
        self
    }

    /// Fail with `FetchError::Other(message)` for files named `name`
    #[must_use]
    pub fn with_failure(mut self, name: &str, message: &str) -> Self {
        self.entries
            .insert(name.to_string(), Canned::Failure(message.to_string()));
        self
    }

    /// Panic while fetching files named `name`
    #[must_use]
    pub fn with_panic(mut self, name: &str) -> Self {
        self.entries.insert(name.to_string(), Canned::Panic);
        self
    }

    /// Number of `fetch` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Paths passed to `fetch`, sorted
    ///
    /// # Panics
    /// Panics if a fetching thread panicked while holding the lock.
    pub fn probed(&self) -> Vec<PathBuf> {
        let mut probed = self.probed.lock().unwrap().clone();
        probed.sort();
        probed
    }
}

impl MetadataFetcher for StaticFetcher {
    fn fetch(&self, path: &Path) -> Result<FetchOutcome, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.probed.lock().unwrap().push(path.to_path_buf());

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match self.entries.get(&name) {
            Some(Canned::Record(record)) => Ok(FetchOutcome::Record(record.clone())),
            Some(Canned::Unusable) | None => Ok(FetchOutcome::Unusable(Unusable::MissingFormat)),
            Some(Canned::Failure(message)) => Err(FetchError::Other(message.clone())),
            Some(Canned::Panic) => panic!("canned panic for {name}"),
        }
    }
}

/// Create empty files under `root`, making parent directories as needed
///
/// # Errors
/// Returns an `io::Error` if a directory or file cannot be created.
///
/// # Examples
/// ```ignore
/// let dir = tempfile::tempdir().unwrap();
/// create_files(dir.path(), &["movie.mp4", "extras/trailer.mkv"]).unwrap();
/// ```
pub fn create_files(root: &Path, names: &[&str]) -> std::io::Result<Vec<PathBuf>> {
    names
        .iter()
        .map(|name| {
            let path = root.join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            create_test_file(&path)?;
            Ok(path)
        })
        .collect()
}

/// Create a file with placeholder content
///
/// # Errors
/// Returns an `io::Error` if the file cannot be created or written.
pub fn create_test_file(path: impl AsRef<Path>) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(b"test content")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_fetcher_serves_by_file_name() {
        let record = MediaRecord::new(60.0, 1024.0, 128.0);
        let fetcher = StaticFetcher::new()
            .with_record("movie.mp4", record.clone())
            .with_failure("bad.mkv", "boom");

        assert_eq!(
            fetcher.fetch(Path::new("/a/b/movie.mp4")).unwrap(),
            FetchOutcome::Record(record)
        );
        assert_eq!(
            fetcher.fetch(Path::new("/a/other.mp4")).unwrap(),
            FetchOutcome::Unusable(Unusable::MissingFormat)
        );
        assert!(matches!(
            fetcher.fetch(Path::new("bad.mkv")),
            Err(FetchError::Other(ref m)) if m == "boom"
        ));
        assert_eq!(fetcher.calls(), 3);
    }

    #[test]
    fn test_create_files_makes_parents() {
        let dir = tempfile::tempdir().unwrap();
        let paths = create_files(dir.path(), &["a.mp4", "x/y/b.mkv"]).unwrap();

        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.is_file()));
        assert_eq!(fs::read_to_string(&paths[1]).unwrap(), "test content");
    }
}

//! Extension-based video detection

use std::collections::HashSet;
use std::path::Path;

/// Extensions treated as video containers
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "3g2", "3gp", "asf", "avi", "divx", "f4v", "flv", "m2ts", "m2v", "m4v", "mkv", "mov", "mp4",
    "mpeg", "mpg", "mts", "mxf", "ogv", "rm", "rmvb", "ts", "vob", "webm", "wmv",
];

/// Partial or in-progress download extensions. Only scanned when enabled.
pub const PARTIAL_EXTENSIONS: &[&str] = &["crdownload", "download", "part", "partial", "!qb"];

/// Decides whether a path looks like a video file from its extension alone
#[derive(Debug, Clone)]
pub struct VideoExtensionClassifier {
    video: HashSet<String>,
    partial: HashSet<String>,
    include_partial: bool,
}

impl Default for VideoExtensionClassifier {
    fn default() -> Self {
        Self {
            video: VIDEO_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
            partial: PARTIAL_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
            include_partial: false,
        }
    }
}

impl VideoExtensionClassifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recognise additional video extensions (leading dots are ignored)
    #[must_use]
    pub fn with_extra<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.video.extend(
            extensions
                .into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .filter(|e| !e.is_empty()),
        );
        self
    }

    /// Also treat partial/segment extensions as video
    #[must_use]
    pub const fn include_partial(mut self, enabled: bool) -> Self {
        self.include_partial = enabled;
        self
    }

    /// True when the path's extension is a recognised video extension
    #[must_use]
    pub fn is_video(&self, path: &Path) -> bool {
        let Some(ext) = lowercase_extension(path) else {
            return false;
        };
        self.video.contains(&ext) || (self.include_partial && self.partial.contains(&ext))
    }

    /// True when the path carries a partial/segment extension
    #[must_use]
    pub fn is_partial(&self, path: &Path) -> bool {
        lowercase_extension(path).is_some_and(|ext| self.partial.contains(&ext))
    }
}

fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_extensions_are_case_insensitive() {
        let classifier = VideoExtensionClassifier::new();
        assert!(classifier.is_video(Path::new("/media/movie.mp4")));
        assert!(classifier.is_video(Path::new("/media/MOVIE.MKV")));
        assert!(!classifier.is_video(Path::new("/media/notes.txt")));
        assert!(!classifier.is_video(Path::new("/media/README")));
    }

    #[test]
    fn test_partial_extensions_are_excluded_by_default() {
        let path = Path::new("/downloads/movie.part");
        let classifier = VideoExtensionClassifier::new();
        assert!(classifier.is_partial(path));
        assert!(!classifier.is_video(path));
        assert!(classifier.include_partial(true).is_video(path));
    }

    #[test]
    fn test_extra_extensions() {
        let classifier = VideoExtensionClassifier::new().with_extra([".Y4M", "nut"]);
        assert!(classifier.is_video(Path::new("clip.y4m")));
        assert!(classifier.is_video(Path::new("clip.nut")));
    }
}

//! Single-criterion evaluation
//!
//! Evaluation is pure: it reads the record and path, never the filesystem.
//! A value that cannot be interpreted for its kind makes the criterion false
//! and logs a warning; the scan carries on.

use std::path::Path;

use super::types::{ComparisonOp, Criterion, CriterionKind};
use crate::media::{MediaRecord, VideoStream};
use crate::units::{self, FormatError};

/// Evaluate one criterion against a file's record and path
#[must_use]
pub fn evaluate(record: &MediaRecord, path: &Path, criterion: &Criterion) -> bool {
    let value = criterion.value.as_str();
    let op = criterion.op;

    match criterion.kind {
        CriterionKind::Path => check_directory(path, value),
        CriterionKind::Filename => check_filename(path, value),
        CriterionKind::Container => check_container(path, value),
        CriterionKind::Duration => {
            check_unit(units::parse_duration(value), record.duration, op, path)
        }
        CriterionKind::Size => {
            check_unit(units::parse_size_bytes(value), record.size_bytes, op, path)
        }
        CriterionKind::Bitrate => {
            check_unit(units::parse_bitrate(value), record.bitrate, op, path)
        }
        CriterionKind::CodecName => {
            with_stream(record, |s| eq_ignore_case(s.codec_name.as_deref(), value))
        }
        CriterionKind::CodecTag => {
            with_stream(record, |s| eq_ignore_case(s.codec_tag_string.as_deref(), value))
        }
        CriterionKind::PixFmt => {
            with_stream(record, |s| eq_ignore_case(s.pix_fmt.as_deref(), value))
        }
        CriterionKind::Aspect => with_stream(record, |s| {
            s.display_aspect_ratio.as_deref() == Some(value)
        }),
        CriterionKind::Width => with_stream(record, |s| {
            s.width
                .is_some_and(|w| check_number(f64::from(w), value, op, criterion.kind, path))
        }),
        CriterionKind::Height => with_stream(record, |s| {
            s.height
                .is_some_and(|h| check_number(f64::from(h), value, op, criterion.kind, path))
        }),
        CriterionKind::Framerate => with_stream(record, |s| {
            check_number(s.frame_rate(), value, op, criterion.kind, path)
        }),
        CriterionKind::Orientation => with_stream(record, |s| check_orientation(s, value, path)),
    }
}

fn with_stream(record: &MediaRecord, check: impl FnOnce(&VideoStream) -> bool) -> bool {
    record.video_stream.as_ref().is_some_and(check)
}

/// Directory part of the path contains `needle`, case-insensitively
fn check_directory(path: &Path, needle: &str) -> bool {
    let dir = path
        .parent()
        .map(|p| p.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    dir.contains(&needle.to_lowercase())
}

/// File name contains `needle`, case-insensitively
fn check_filename(path: &Path, needle: &str) -> bool {
    path.file_name()
        .is_some_and(|n| n.to_string_lossy().to_lowercase().contains(&needle.to_lowercase()))
}

/// Extension equals `ext` (with or without a leading dot), case-insensitively
fn check_container(path: &Path, ext: &str) -> bool {
    let ext = ext.strip_prefix('.').unwrap_or(ext);
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

fn eq_ignore_case(actual: Option<&str>, expected: &str) -> bool {
    actual.is_some_and(|a| a.eq_ignore_ascii_case(expected))
}

fn check_unit(
    target: Result<f64, FormatError>,
    actual: f64,
    op: ComparisonOp,
    path: &Path,
) -> bool {
    match target {
        Ok(target) => op.compare(actual, target),
        Err(e) => {
            tracing::warn!("{e} (while checking {})", path.display());
            false
        }
    }
}

/// Compare against a plain number. Anything from the first ':' on is
/// ignored, so `1920:px` reads as 1920.
fn check_number(
    actual: f64,
    value: &str,
    op: ComparisonOp,
    kind: CriterionKind,
    path: &Path,
) -> bool {
    let number = value.split(':').next().unwrap_or_default().trim();
    match number.parse::<f64>() {
        Ok(target) if target.is_finite() => op.compare(actual, target),
        _ => {
            tracing::warn!(
                "Invalid {kind} argument format: {value} (while checking {})",
                path.display()
            );
            false
        }
    }
}

fn check_orientation(stream: &VideoStream, value: &str, path: &Path) -> bool {
    let (Some(width), Some(height)) = (stream.width, stream.height) else {
        return false;
    };

    match value.to_ascii_lowercase().as_str() {
        "landscape" | "l" => width > height,
        "portrait" | "p" => height > width,
        "square" | "sq" => width == height,
        _ => {
            tracing::warn!(
                "Invalid orientation argument format: {value} (while checking {})",
                path.display()
            );
            false
        }
    }
}

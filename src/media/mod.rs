//! Media metadata
//!
//! Everything the scanner needs to know about a file beyond its path:
//!
//! - **`MediaRecord`**: decoded probe output (duration, size, bitrate, first
//!   video stream)
//! - **`MetadataFetcher`**: the seam the scanner fetches records through, with
//!   `FfprobeFetcher` as the production implementation
//! - **`VideoExtensionClassifier`**: cheap extension check that decides which
//!   files are worth probing at all

pub mod classify;
pub mod error;
pub mod fetcher;
pub mod record;

pub use classify::{PARTIAL_EXTENSIONS, VIDEO_EXTENSIONS, VideoExtensionClassifier};
pub use error::{FetchError, Unusable};
pub use fetcher::{FetchOutcome, FfprobeFetcher, MetadataFetcher};
pub use record::{MediaRecord, VideoStream};

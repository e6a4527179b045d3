use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Cannot open file list {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error writing filelist {}: {source}", path.display())]
    FileList {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error writing output: {0}")]
    Console(#[from] io::Error),
}

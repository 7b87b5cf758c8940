use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by a persistent high-score store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no local data directory is available for the score file")]
    NoDataDir,

    #[error("failed to access score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("score file {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

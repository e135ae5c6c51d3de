use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tokio::task::JoinError;

/// Folder-level failures. Only the composite report surfaces these to callers.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Folder [{}] does not exist or contains no files", path.display())]
    NotFound {
        path: PathBuf
    },
    #[error("Folder [{}] could not be listed: {source}", path.display())]
    Io {
        path: PathBuf,
        source: io::Error
    },
    #[error("Analysis task did not complete: {0}")]
    Task(#[from] JoinError)
}

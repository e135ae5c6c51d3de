use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::analysis::StatisticsError;
use crate::models::LineError;

/// Failure to load one daily file. The folder fold absorbs these per file.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("File [{}] does not exist or is not a regular file", path.display())]
    NotFound {
        path: PathBuf
    },
    #[error("File [{}] could not be read: {source}", path.display())]
    Io {
        path: PathBuf,
        source: io::Error
    },
    #[error("File [{}] line {line}: {source}", path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        source: LineError
    },
    #[error("File [{}] statistics could not be computed: {source}", path.display())]
    Statistics {
        path: PathBuf,
        source: StatisticsError
    }
}

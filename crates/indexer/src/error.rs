use crate::stats::LoadStats;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexerError>;

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("Source directory does not exist: {}", .0.display())]
    SourceDirMissing(PathBuf),

    #[error(
        "No index data loaded ({} files missing, {} unreadable)",
        .0.files_missing.len(),
        .0.failures.len()
    )]
    EmptyLoad(LoadStats),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl IndexerError {
    /// True for the "nothing to query" outcome as opposed to a hard failure
    pub fn is_empty_load(&self) -> bool {
        matches!(self, Self::EmptyLoad(_))
    }
}

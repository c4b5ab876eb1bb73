use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How a single index file failed to load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileFailureKind {
    /// Content is not valid UTF-8
    Decode,
    /// File could not be opened or read
    Io,
}

/// A file that was present but skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub kind: FileFailureKind,
    pub message: String,
}

/// Statistics about a load operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStats {
    /// Files that contributed rows (or parsed cleanly with zero rows)
    pub files_loaded: usize,

    /// Expected files that were not on disk
    pub files_missing: Vec<PathBuf>,

    /// Files that were present but unreadable
    pub failures: Vec<FileFailure>,

    /// Records produced
    pub rows: usize,

    /// Lines past the header block that were excluded
    pub malformed_rows: usize,

    /// Time taken in milliseconds
    pub time_ms: u64,
}

impl LoadStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, rows: usize, malformed: usize) {
        self.files_loaded += 1;
        self.rows += rows;
        self.malformed_rows += malformed;
    }

    pub fn add_missing(&mut self, path: PathBuf) {
        self.files_missing.push(path);
    }

    pub fn add_failure(&mut self, failure: FileFailure) {
        self.failures.push(failure);
    }
}

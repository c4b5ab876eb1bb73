use crate::error::{IndexerError, Result};
use crate::parser::{parse_line, HEADER_LINES};
use crate::period::Period;
use crate::record::{FilingRecord, RecordCollection};
use crate::stats::{FileFailure, FileFailureKind, LoadStats};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Extension of the registry's fixed-width index files
const INDEX_EXTENSION: &str = "idx";

/// Result of a successful load
#[derive(Debug, Clone)]
pub struct LoadedIndex {
    pub records: RecordCollection,
    pub stats: LoadStats,
}

/// Rows parsed out of one index file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedIndex {
    pub records: Vec<FilingRecord>,
    pub malformed: usize,
}

/// Loads quarterly company index files from a directory
pub struct IndexLoader {
    source_dir: PathBuf,
}

impl IndexLoader {
    pub fn new(source_dir: impl AsRef<Path>) -> Self {
        Self {
            source_dir: source_dir.as_ref().to_path_buf(),
        }
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Load every quarter file the period expects.
    ///
    /// Absent files are skipped, unreadable files are recorded in the stats and
    /// skipped. Returns [`IndexerError::EmptyLoad`] when nothing yielded a row.
    pub fn load(&self, period: &Period) -> Result<LoadedIndex> {
        self.ensure_source_dir()?;
        log::debug!(
            "Loading period {period} from {}",
            self.source_dir.display()
        );

        let paths = period
            .file_names()
            .into_iter()
            .map(|name| self.source_dir.join(name));
        self.load_paths(paths)
    }

    /// Load every `*.idx` file in the directory, ordered by file name
    pub fn load_all(&self) -> Result<LoadedIndex> {
        self.ensure_source_dir()?;

        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.source_dir)? {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    let is_index = path
                        .extension()
                        .and_then(|ext| ext.to_str())
                        .is_some_and(|ext| ext.eq_ignore_ascii_case(INDEX_EXTENSION));
                    if is_index && path.is_file() {
                        paths.push(path);
                    }
                }
                Err(e) => log::warn!("Failed to read entry: {e}"),
            }
        }
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        log::info!("Found {} index files", paths.len());
        self.load_paths(paths)
    }

    fn ensure_source_dir(&self) -> Result<()> {
        if self.source_dir.is_dir() {
            Ok(())
        } else {
            Err(IndexerError::SourceDirMissing(self.source_dir.clone()))
        }
    }

    fn load_paths(&self, paths: impl IntoIterator<Item = PathBuf>) -> Result<LoadedIndex> {
        let started = Instant::now();
        let mut stats = LoadStats::new();
        let mut records = Vec::new();

        for path in paths {
            match read_index_file(&path) {
                Ok(Some(parsed)) => {
                    log::debug!(
                        "{}: {} rows, {} malformed",
                        path.display(),
                        parsed.records.len(),
                        parsed.malformed
                    );
                    stats.add_file(parsed.records.len(), parsed.malformed);
                    records.extend(parsed.records);
                }
                Ok(None) => {
                    log::debug!("Skipping absent index file {}", path.display());
                    stats.add_missing(path);
                }
                Err(failure) => {
                    log::warn!("Error reading {}: {}", path.display(), failure.message);
                    stats.add_failure(failure);
                }
            }
        }

        stats.time_ms = started.elapsed().as_millis() as u64;

        if records.is_empty() {
            log::warn!(
                "No data was loaded from {} ({} missing, {} unreadable)",
                self.source_dir.display(),
                stats.files_missing.len(),
                stats.failures.len()
            );
            return Err(IndexerError::EmptyLoad(stats));
        }

        log::info!(
            "Loaded {} records from {} files in {}ms",
            stats.rows,
            stats.files_loaded,
            stats.time_ms
        );
        Ok(LoadedIndex {
            records: RecordCollection::from(records),
            stats,
        })
    }
}

/// Read and parse one file; `Ok(None)` when the file does not exist
fn read_index_file(path: &Path) -> std::result::Result<Option<ParsedIndex>, FileFailure> {
    let failure = |kind: FileFailureKind, message: String| FileFailure {
        path: path.to_path_buf(),
        kind,
        message,
    };

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(failure(FileFailureKind::Io, e.to_string())),
    };
    let content =
        String::from_utf8(bytes).map_err(|e| failure(FileFailureKind::Decode, e.to_string()))?;

    Ok(Some(parse_index(&content)))
}

/// Parse the text of a company index: skip the banner, keep well-formed rows.
///
/// Blank lines are ignored; any other line that does not parse is counted as
/// malformed and excluded.
pub fn parse_index(content: &str) -> ParsedIndex {
    let mut parsed = ParsedIndex::default();
    for (offset, line) in content.lines().enumerate().skip(HEADER_LINES) {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok(record) => parsed.records.push(record),
            Err(reason) => {
                log::trace!("line {}: {reason}", offset + 1);
                parsed.malformed += 1;
            }
        }
    }
    parsed
}

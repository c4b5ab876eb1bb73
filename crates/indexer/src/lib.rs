//! # Filings Indexer
//!
//! Fixed-width EDGAR company index parsing and loading.
//!
//! ## Pipeline
//!
//! ```text
//! Source directory
//!     │
//!     ├──> Period (year + quarters)
//!     │      └─> {year}_{QTRn}_company.idx, canonical order
//!     │
//!     ├──> Fixed-width parser (9-line banner skipped)
//!     │      └─> FilingRecord per data line
//!     │
//!     └──> Merge (file order, then line order)
//!            └─> RecordCollection
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use filings_indexer::{IndexLoader, IndexerError, Period};
//!
//! fn main() -> Result<(), IndexerError> {
//!     let loader = IndexLoader::new("/path/to/idx");
//!     match loader.load(&Period::year(2023)) {
//!         Ok(loaded) => println!("Loaded {} filings", loaded.records.len()),
//!         Err(IndexerError::EmptyLoad(stats)) => {
//!             println!("No data ({} files missing)", stats.files_missing.len())
//!         }
//!         Err(e) => return Err(e),
//!     }
//!     Ok(())
//! }
//! ```

mod error;
mod export;
mod loader;
mod parser;
mod period;
mod record;
mod stats;

pub use error::{IndexerError, Result};
pub use export::{export_csv, import_csv, read_csv, write_csv};
pub use loader::{parse_index, IndexLoader, LoadedIndex, ParsedIndex};
pub use parser::{
    parse_line, Column, MalformedRow, COLUMNS, COMPANY_NAME, DATE_FILED, FILENAME, FORM_TYPE,
    HEADER_LINES, MIN_LINE_WIDTH, REGISTRANT_ID,
};
pub use period::{index_file_name, Period, Quarter};
pub use record::{FilingRecord, RecordCollection};
pub use stats::{FileFailure, FileFailureKind, LoadStats};

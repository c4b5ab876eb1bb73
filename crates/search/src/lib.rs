//! In-memory query engine over a loaded [`RecordCollection`](filings_indexer::RecordCollection).
//!
//! Search resolves a term to entities, [`filings_for`] lists one entity's
//! filings for a period, and [`resolve_selection`] turns a chosen ordinal into
//! an archive URL. Nothing here mutates the collection.

mod entities;
mod error;
mod filings;
mod identifier;
mod selection;

pub use entities::{find_entities, EntityMatch, SearchMode};
pub use error::{Result, SelectionError};
pub use filings::filings_for;
pub use identifier::{normalize_registrant_id, same_registrant};
pub use selection::{
    parse_ordinal, resolve_selection, resolve_selection_with_base, select, select_at,
    RetrievalLocation, ARCHIVES_BASE_URL,
};

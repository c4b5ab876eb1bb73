use crate::error::{Result, SelectionError};
use filings_indexer::FilingRecord;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Prefix that turns an index `filename` into a retrievable URL
pub const ARCHIVES_BASE_URL: &str = "https://www.sec.gov/Archives/";

/// Ready-to-use locator of a filing; reachability is not checked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RetrievalLocation(String);

impl RetrievalLocation {
    /// `base` and `filename` are concatenated verbatim
    pub fn new(base: &str, filename: &str) -> Self {
        Self(format!("{base}{filename}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RetrievalLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse user-supplied ordinal text (surrounding whitespace allowed)
pub fn parse_ordinal(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| SelectionError::NotAnInteger {
            input: raw.to_string(),
        })
}

/// Item at `ordinal`, with out-of-range (including negative) reported, not panicking
pub fn select_at<T>(items: &[T], ordinal: i64) -> Result<&T> {
    if items.is_empty() {
        return Err(SelectionError::EmptyList);
    }
    usize::try_from(ordinal)
        .ok()
        .and_then(|index| items.get(index))
        .ok_or(SelectionError::OutOfRange {
            ordinal,
            len: items.len(),
        })
}

/// Item chosen by raw ordinal text, e.g. an entity from a search result
pub fn select<'a, T>(items: &'a [T], raw: &str) -> Result<&'a T> {
    if items.is_empty() {
        return Err(SelectionError::EmptyList);
    }
    select_at(items, parse_ordinal(raw)?)
}

/// Resolve the chosen filing to its archive URL
pub fn resolve_selection<R: Borrow<FilingRecord>>(
    filings: &[R],
    raw: &str,
) -> Result<RetrievalLocation> {
    resolve_selection_with_base(filings, raw, ARCHIVES_BASE_URL)
}

pub fn resolve_selection_with_base<R: Borrow<FilingRecord>>(
    filings: &[R],
    raw: &str,
    base: &str,
) -> Result<RetrievalLocation> {
    let filing: &FilingRecord = select(filings, raw)?.borrow();
    Ok(RetrievalLocation::new(base, &filing.filename))
}

use serde::{Deserialize, Serialize};
use std::ops::Index;

/// One row of a quarterly company index
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilingRecord {
    /// Registrant name, padding removed
    pub company_name: String,

    /// Filing category code (10-K, 8-K, ...)
    pub form_type: String,

    /// Registrant identifier (CIK) exactly as stored in the index
    pub registrant_id: String,

    /// Filing date in registry-native form, never reformatted
    pub date_filed: String,

    /// Archive-relative path of the filing
    pub filename: String,
}

impl FilingRecord {
    pub fn new(
        company_name: impl Into<String>,
        form_type: impl Into<String>,
        registrant_id: impl Into<String>,
        date_filed: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            company_name: company_name.into(),
            form_type: form_type.into(),
            registrant_id: registrant_id.into(),
            date_filed: date_filed.into(),
            filename: filename.into(),
        }
    }
}

/// Ordered, immutable set of records produced by a single load.
///
/// Order is file processing order, then line order within each file. Ordinal
/// selection downstream is defined against this order, so there is no API to
/// reorder or mutate the collection once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordCollection {
    records: Vec<FilingRecord>,
}

impl RecordCollection {
    /// The explicit "no data" collection
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FilingRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FilingRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[FilingRecord] {
        &self.records
    }

    pub fn into_vec(self) -> Vec<FilingRecord> {
        self.records
    }
}

impl From<Vec<FilingRecord>> for RecordCollection {
    fn from(records: Vec<FilingRecord>) -> Self {
        Self { records }
    }
}

impl FromIterator<FilingRecord> for RecordCollection {
    fn from_iter<I: IntoIterator<Item = FilingRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RecordCollection {
    type Item = &'a FilingRecord;
    type IntoIter = std::slice::Iter<'a, FilingRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl Index<usize> for RecordCollection {
    type Output = FilingRecord;

    fn index(&self, index: usize) -> &Self::Output {
        &self.records[index]
    }
}

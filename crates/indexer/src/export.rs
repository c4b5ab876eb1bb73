//! Tabular (CSV) form of a record collection.
//!
//! Columns follow the field order of [`FilingRecord`]; the header row holds
//! the field names.

use crate::error::Result;
use crate::record::{FilingRecord, RecordCollection};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Write records as CSV with a header row
pub fn write_csv<'a, W, I>(records: I, writer: W) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a FilingRecord>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut written = 0;
    for record in records {
        csv_writer.serialize(record)?;
        written += 1;
    }
    if written == 0 {
        // serde only emits the header alongside the first row
        csv_writer.write_record(CSV_HEADER)?;
    }
    csv_writer.flush()?;
    Ok(written)
}

/// Write the whole collection to `path`, replacing any existing file
pub fn export_csv(records: &RecordCollection, path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let written = write_csv(records, file)?;
    log::info!("Data saved successfully to {} ({written} rows)", path.display());
    Ok(written)
}

/// Read a table produced by [`write_csv`] back into a collection
pub fn read_csv<R: Read>(reader: R) -> Result<RecordCollection> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let records = csv_reader
        .deserialize::<FilingRecord>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(RecordCollection::from(records))
}

pub fn import_csv(path: impl AsRef<Path>) -> Result<RecordCollection> {
    read_csv(File::open(path)?)
}

const CSV_HEADER: [&str; 5] = [
    "company_name",
    "form_type",
    "registrant_id",
    "date_filed",
    "filename",
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn sample() -> RecordCollection {
        vec![
            FilingRecord::new(
                "SMITH, JONES & CO",
                "10-K",
                "0000320193",
                "2023-02-03",
                "edgar/data/320193/0000320193-23-000006.txt",
            ),
            FilingRecord::new(
                "QUOTE \"TEST\" LLC",
                "SC 13G/A",
                "42",
                "2023-04-01",
                "edgar/data/42/x.txt",
            ),
        ]
        .into()
    }

    #[test]
    fn header_row_names_fields_in_order() {
        let mut out = Vec::new();
        write_csv(&sample(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text.lines().next(),
            Some("company_name,form_type,registrant_id,date_filed,filename")
        );
    }

    #[test]
    fn csv_reads_back_same_fields() {
        let original = sample();
        let mut out = Vec::new();
        assert_eq!(write_csv(&original, &mut out).unwrap(), 2);

        let restored = read_csv(out.as_slice()).unwrap();
        assert_eq!(restored, original);
        // identifiers stay text, zero padding included
        assert_eq!(restored[0].registrant_id, "0000320193");
    }

    #[test]
    fn empty_collection_still_writes_header() {
        let mut out = Vec::new();
        assert_eq!(write_csv(&RecordCollection::empty(), &mut out).unwrap(), 0);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text.trim_end(),
            "company_name,form_type,registrant_id,date_filed,filename"
        );
    }

    #[test]
    fn export_and_import_through_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("combined_data.csv");

        export_csv(&sample(), &path).unwrap();
        let restored = import_csv(&path).unwrap();
        assert_eq!(restored.len(), 2);
        assert_eq!(restored[1].form_type, "SC 13G/A");
    }
}

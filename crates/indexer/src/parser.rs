use crate::record::FilingRecord;
use std::fmt;
use thiserror::Error;

/// Lines at the top of every index file that carry the banner, not data
pub const HEADER_LINES: usize = 9;

/// A data line must reach at least one byte into the filename column
pub const MIN_LINE_WIDTH: usize = FILENAME.start + 1;

/// Byte range of a fixed-width column; `end == None` runs to end of line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub start: usize,
    pub end: Option<usize>,
}

pub const COMPANY_NAME: Column = Column {
    name: "company_name",
    start: 0,
    end: Some(62),
};
pub const FORM_TYPE: Column = Column {
    name: "form_type",
    start: 62,
    end: Some(74),
};
pub const REGISTRANT_ID: Column = Column {
    name: "registrant_id",
    start: 74,
    end: Some(86),
};
pub const DATE_FILED: Column = Column {
    name: "date_filed",
    start: 86,
    end: Some(98),
};
pub const FILENAME: Column = Column {
    name: "filename",
    start: 98,
    end: None,
};

pub const COLUMNS: [Column; 5] = [COMPANY_NAME, FORM_TYPE, REGISTRANT_ID, DATE_FILED, FILENAME];

/// Why a line was excluded from the record set
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedRow {
    #[error("line is {width} bytes wide, need at least {}", MIN_LINE_WIDTH)]
    TooShort { width: usize },

    #[error("header line reached the parser")]
    HeaderRule,

    #[error("column boundary at byte {offset} splits a character")]
    SplitCharacter { offset: usize },

    #[error("column {field} is blank")]
    EmptyField { field: &'static str },
}

impl Column {
    fn slice<'a>(&self, line: &'a str) -> Result<&'a str, MalformedRow> {
        let end = self.end.unwrap_or(line.len()).min(line.len());
        line.get(self.start..end).ok_or_else(|| {
            let offset = if line.is_char_boundary(self.start) {
                end
            } else {
                self.start
            };
            MalformedRow::SplitCharacter { offset }
        })
    }

    /// Column content with the fixed-width padding removed
    fn extract<'a>(&self, line: &'a str) -> Result<&'a str, MalformedRow> {
        Ok(self.slice(line)?.trim())
    }

    fn extract_required<'a>(&self, line: &'a str) -> Result<&'a str, MalformedRow> {
        let value = self.extract(line)?;
        if value.is_empty() {
            return Err(MalformedRow::EmptyField { field: self.name });
        }
        Ok(value)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "{}[{},{})", self.name, self.start, end),
            None => write!(f, "{}[{},end)", self.name, self.start),
        }
    }
}

/// Parse one data line of a company index into a record.
///
/// Fields are cut at fixed byte offsets, so delimiter-like content (commas,
/// pipes, runs of spaces) inside a column never shifts the other fields.
pub fn parse_line(line: &str) -> Result<FilingRecord, MalformedRow> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);

    if is_header_line(line) {
        return Err(MalformedRow::HeaderRule);
    }
    if line.len() < MIN_LINE_WIDTH {
        return Err(MalformedRow::TooShort { width: line.len() });
    }

    Ok(FilingRecord {
        company_name: COMPANY_NAME.extract(line)?.to_string(),
        form_type: FORM_TYPE.extract(line)?.to_string(),
        registrant_id: REGISTRANT_ID.extract_required(line)?.to_string(),
        date_filed: DATE_FILED.extract_required(line)?.to_string(),
        filename: FILENAME.extract_required(line)?.to_string(),
    })
}

/// Column-label line or the dashed rule under it
fn is_header_line(line: &str) -> bool {
    let trimmed = line.trim();
    if !trimmed.is_empty() && trimmed.chars().all(|c| c == '-') {
        return true;
    }
    trimmed.starts_with("Company Name") && trimmed.contains("Form Type")
}

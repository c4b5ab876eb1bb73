use anyhow::Result;
use filings_indexer::{FilingRecord, LoadStats};
use filings_search::EntityMatch;
use serde::Serialize;
use std::io::{self, Write};

/// Write to stdout, treating a closed pipe (`| head`) as success
pub fn print_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    print_stdout(&serde_json::to_string_pretty(value)?)
}

/// Numbered entity list; the number is the ordinal accepted by `--entity`
pub fn render_entities(entities: &[EntityMatch]) -> String {
    let cik_width = column_width(entities.iter().map(|e| e.registrant_id.as_str()), "CIK");
    let idx_width = entities.len().saturating_sub(1).to_string().len().max(1);

    let mut out = String::new();
    out.push_str(&format!(
        "{:>idx_width$}  {:<cik_width$}  Company Name\n",
        "#", "CIK"
    ));
    for (i, entity) in entities.iter().enumerate() {
        out.push_str(&format!(
            "{i:>idx_width$}  {:<cik_width$}  {}\n",
            entity.registrant_id, entity.company_name
        ));
    }
    out.truncate(out.trim_end().len());
    out
}

/// Numbered filing list; the number is the ordinal accepted by `--filing`
pub fn render_filings(filings: &[&FilingRecord]) -> String {
    let form_width = column_width(filings.iter().map(|f| f.form_type.as_str()), "Form Type");
    let date_width = column_width(filings.iter().map(|f| f.date_filed.as_str()), "Date Filed");
    let idx_width = filings.len().saturating_sub(1).to_string().len().max(1);

    let mut out = String::new();
    out.push_str(&format!(
        "{:>idx_width$}  {:<form_width$}  {:<date_width$}  Filename\n",
        "#", "Form Type", "Date Filed"
    ));
    for (i, filing) in filings.iter().enumerate() {
        out.push_str(&format!(
            "{i:>idx_width$}  {:<form_width$}  {:<date_width$}  {}\n",
            filing.form_type, filing.date_filed, filing.filename
        ));
    }
    out.truncate(out.trim_end().len());
    out
}

/// One-line load summary for stderr
pub fn describe_load(stats: &LoadStats) -> String {
    let mut line = format!(
        "Loaded {} filings from {} files in {}ms",
        stats.rows, stats.files_loaded, stats.time_ms
    );
    if !stats.files_missing.is_empty() {
        line.push_str(&format!(", {} missing", stats.files_missing.len()));
    }
    if !stats.failures.is_empty() {
        line.push_str(&format!(", {} unreadable", stats.failures.len()));
    }
    if stats.malformed_rows > 0 {
        line.push_str(&format!(", {} malformed rows skipped", stats.malformed_rows));
    }
    line
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: &str) -> usize {
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0)
        .max(header.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entities_are_numbered_from_zero() {
        let rendered = render_entities(&[
            EntityMatch {
                company_name: "APPLE INC".to_string(),
                registrant_id: "320193".to_string(),
            },
            EntityMatch {
                company_name: "APPLE HOSPITALITY REIT".to_string(),
                registrant_id: "1418121".to_string(),
            },
        ]);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "#  CIK      Company Name");
        assert_eq!(lines[1], "0  320193   APPLE INC");
        assert_eq!(lines[2], "1  1418121  APPLE HOSPITALITY REIT");
    }

    #[test]
    fn filings_table_keeps_filename_verbatim() {
        let filing = FilingRecord::new("X", "10-K", "1", "2023-01-01", "edgar/data/1/a b.txt");
        let rendered = render_filings(&[&filing]);
        assert!(rendered.ends_with("edgar/data/1/a b.txt"));
        assert!(rendered.starts_with("#  Form Type  Date Filed  Filename"));
    }

    #[test]
    fn load_summary_mentions_gaps() {
        let stats = LoadStats {
            files_loaded: 2,
            rows: 10,
            malformed_rows: 1,
            files_missing: vec!["a".into(), "b".into()],
            ..LoadStats::default()
        };
        assert_eq!(
            describe_load(&stats),
            "Loaded 10 filings from 2 files in 0ms, 2 missing, 1 malformed rows skipped"
        );
    }
}

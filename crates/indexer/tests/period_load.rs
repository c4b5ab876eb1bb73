use filings_indexer::{
    export_csv, import_csv, IndexLoader, IndexerError, Period, Quarter, HEADER_LINES,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn row(name: &str, form: &str, cik: &str, date: &str, file: &str) -> String {
    format!("{name:<62}{form:<12}{cik:<12}{date:<12}{file}")
}

fn write_index(dir: &Path, file_name: &str, rows: &[String]) {
    let mut lines: Vec<String> = (0..HEADER_LINES).map(|i| format!("banner line {i}")).collect();
    lines.extend(rows.iter().cloned());
    fs::write(dir.join(file_name), lines.join("\n")).expect("write index");
}

#[test]
fn merges_quarters_in_file_then_line_order() {
    let temp = TempDir::new().expect("tempdir");
    // written out of order on purpose
    write_index(
        temp.path(),
        "2023_QTR2_company.idx",
        &[row("APPLE INC", "8-K", "320193", "2023-04-02", "edgar/data/320193/q2.txt")],
    );
    write_index(
        temp.path(),
        "2023_QTR1_company.idx",
        &[
            row("APPLE INC", "10-Q", "320193", "2023-01-10", "edgar/data/320193/q1.txt"),
            row("ACME CORP", "4", "1000", "2023-01-11", "edgar/data/1000/q1.txt"),
        ],
    );

    let loaded = IndexLoader::new(temp.path())
        .load(&Period::year(2023))
        .expect("load");

    let files: Vec<&str> = loaded.records.iter().map(|r| r.filename.as_str()).collect();
    assert_eq!(
        files,
        vec![
            "edgar/data/320193/q1.txt",
            "edgar/data/1000/q1.txt",
            "edgar/data/320193/q2.txt",
        ]
    );
    assert_eq!(loaded.stats.files_loaded, 2);
    assert_eq!(loaded.stats.rows, 3);
    assert_eq!(loaded.stats.files_missing.len(), 2);
}

#[test]
fn quarter_scope_ignores_other_files() {
    let temp = TempDir::new().expect("tempdir");
    write_index(
        temp.path(),
        "2022_QTR1_company.idx",
        &[row("IN SCOPE", "10-K", "1", "2022-03-01", "edgar/a.txt")],
    );
    write_index(
        temp.path(),
        "2022_QTR3_company.idx",
        &[row("OUT OF SCOPE", "10-K", "2", "2022-08-01", "edgar/b.txt")],
    );
    write_index(
        temp.path(),
        "2021_QTR1_company.idx",
        &[row("OTHER YEAR", "10-K", "3", "2021-03-01", "edgar/c.txt")],
    );

    let loaded = IndexLoader::new(temp.path())
        .load(&Period::with_quarters(2022, [Quarter::Q1]))
        .expect("load");

    assert_eq!(loaded.records.len(), 1);
    assert_eq!(loaded.records[0].company_name, "IN SCOPE");
    assert!(loaded.stats.files_missing.is_empty());
}

#[test]
fn period_without_files_is_empty_load() {
    let temp = TempDir::new().expect("tempdir");
    write_index(
        temp.path(),
        "2021_QTR1_company.idx",
        &[row("OTHER YEAR", "10-K", "3", "2021-03-01", "edgar/c.txt")],
    );

    let err = IndexLoader::new(temp.path())
        .load(&Period::year(2023))
        .expect_err("no 2023 files");
    assert!(matches!(err, IndexerError::EmptyLoad(_)));
}

#[test]
fn header_only_files_are_empty_load() {
    let temp = TempDir::new().expect("tempdir");
    write_index(temp.path(), "2023_QTR1_company.idx", &[]);

    let err = IndexLoader::new(temp.path())
        .load(&Period::year(2023))
        .expect_err("no rows");
    let IndexerError::EmptyLoad(stats) = err else {
        panic!("expected empty load");
    };
    assert_eq!(stats.files_loaded, 1);
    assert_eq!(stats.rows, 0);
}

#[test]
fn loaded_collection_survives_csv_export() {
    let temp = TempDir::new().expect("tempdir");
    write_index(
        temp.path(),
        "2023_QTR1_company.idx",
        &[row(
            "COMMA, PIPE | CO",
            "10-K",
            "0000320193",
            "2023-01-10",
            "edgar/data/320193/q1.txt",
        )],
    );

    let loaded = IndexLoader::new(temp.path())
        .load(&Period::year(2023))
        .expect("load");
    let csv_path = temp.path().join("combined.csv");
    export_csv(&loaded.records, &csv_path).expect("export");

    assert_eq!(import_csv(&csv_path).expect("import"), loaded.records);
}

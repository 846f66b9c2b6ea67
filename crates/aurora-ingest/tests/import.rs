//! File-backed import pipeline: parse, profile, infer, project.

use std::io::Write;

use aurora_ingest::{CsvTable, apply_mapping, suggest_schema};
use aurora_model::{ColumnMapping, ColumnType};

fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write csv");
    file
}

#[test]
fn loads_csv_from_disk() {
    let file = write_csv("name,email\nAda,ada@example.com\nAlan,alan@example.com\n");
    let table = CsvTable::load(file.path()).expect("load csv");
    assert_eq!(table.headers, vec!["name", "email"]);
    assert_eq!(table.rows.len(), 2);
}

#[test]
fn load_reports_missing_file() {
    let err = CsvTable::load(std::path::Path::new("/no/such/file.csv")).unwrap_err();
    assert!(err.to_string().contains("/no/such/file.csv"));
}

#[test]
fn full_pipeline_from_file_to_projected_table() {
    let file = write_csv(
        "Full Name,Contact,Joined,Notes\n\
         Ada Lovelace,ada@example.com,2024-01-15,first\n\
         Alan Turing,alan@example.com,2024-02-20,\n",
    );
    let table = CsvTable::load(file.path()).expect("load csv");

    let suggested = suggest_schema(&table, &[]);
    let types: Vec<ColumnType> = suggested.iter().map(|c| c.column_type).collect();
    assert_eq!(
        types,
        vec![
            ColumnType::Text,
            ColumnType::Email,
            ColumnType::Date,
            ColumnType::Text,
        ]
    );
    assert!(suggested[1].is_required);
    assert!(!suggested[3].is_required);

    let mappings = vec![
        ColumnMapping::manual("Full Name", "name"),
        ColumnMapping::manual("Contact", "email"),
        ColumnMapping::manual("Joined", "created_date"),
    ];
    let projected = apply_mapping(&table, &mappings);
    assert_eq!(projected.headers, vec!["name", "email", "created_date"]);
    assert_eq!(
        projected.rows[0],
        vec!["Ada Lovelace", "ada@example.com", "2024-01-15"]
    );

    let hints = projected.column_hints();
    assert!((hints["email"].unique_ratio - 1.0).abs() < 1e-9);
    assert!(!hints["name"].is_numeric);
}

use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use tracing::debug;

use aurora_model::ColumnHint;

/// An imported file as a header row plus string cells.
///
/// Cells are trimmed on the way in; ragged rows are padded with empty
/// strings to header width.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

impl CsvTable {
    /// Load a CSV file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("open csv: {}", path.display()))?;
        Self::from_reader(file).with_context(|| format!("read csv: {}", path.display()))
    }

    /// Parse CSV from any reader. The first record is the header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut records = csv.records();
        let Some(first) = records.next() else {
            return Ok(Self::default());
        };
        let headers: Vec<String> = first
            .context("read header record")?
            .iter()
            .map(normalize_header)
            .collect();

        let mut rows = Vec::new();
        for record in records {
            let record = record.context("read record")?;
            if record.iter().all(|value| value.trim().is_empty()) {
                continue;
            }
            let mut row = Vec::with_capacity(headers.len());
            for idx in 0..headers.len() {
                let value = record.get(idx).unwrap_or("");
                row.push(normalize_cell(value));
            }
            rows.push(row);
        }

        debug!(columns = headers.len(), rows = rows.len(), "parsed csv table");
        Ok(Self { headers, rows })
    }

    /// Write the table as CSV.
    pub fn write(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("create csv: {}", path.display()))?;
        writer.write_record(&self.headers).context("write header")?;
        for row in &self.rows {
            writer.write_record(row).context("write row")?;
        }
        writer.flush().context("flush csv")?;
        Ok(())
    }

    /// Values of one column by header name, in row order.
    #[must_use]
    pub fn column(&self, header: &str) -> Option<Vec<&str>> {
        let idx = self.headers.iter().position(|h| h == header)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).map_or("", String::as_str))
                .collect(),
        )
    }

    /// Per-column profiling statistics keyed by header.
    #[must_use]
    pub fn column_hints(&self) -> BTreeMap<String, ColumnHint> {
        let mut hints = BTreeMap::new();
        let row_count = self.rows.len();
        for (col_idx, header) in self.headers.iter().enumerate() {
            let mut non_null = 0usize;
            let mut numeric = 0usize;
            let mut uniques = BTreeSet::new();
            for row in &self.rows {
                let value = row.get(col_idx).map_or("", String::as_str);
                if value.is_empty() {
                    continue;
                }
                non_null += 1;
                uniques.insert(value);
                if value.parse::<f64>().is_ok() {
                    numeric += 1;
                }
            }
            let null_ratio = if row_count == 0 {
                1.0
            } else {
                (row_count - non_null) as f64 / row_count as f64
            };
            let unique_ratio = if non_null == 0 {
                0.0
            } else {
                uniques.len() as f64 / non_null as f64
            };
            hints.insert(
                header.clone(),
                ColumnHint {
                    is_numeric: non_null > 0 && numeric == non_null,
                    unique_ratio,
                    null_ratio,
                    label: None,
                },
            );
        }
        hints
    }
}

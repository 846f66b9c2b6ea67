//! Projection of an imported table through a column mapping.

use aurora_model::ColumnMapping;
use tracing::debug;

use crate::csv_table::CsvTable;

/// Project a table onto its mapped target columns.
///
/// The output has one column per mapped entry, in mapping order, named
/// by the target. Source columns with no mapping (or an empty target)
/// are dropped; a mapping whose source is missing from the table
/// yields an empty column.
#[must_use]
pub fn apply_mapping(table: &CsvTable, mappings: &[ColumnMapping]) -> CsvTable {
    let active: Vec<&ColumnMapping> = mappings.iter().filter(|m| m.is_mapped()).collect();
    let source_indices: Vec<Option<usize>> = active
        .iter()
        .map(|m| table.headers.iter().position(|h| h == &m.source_column))
        .collect();

    let headers: Vec<String> = active.iter().map(|m| m.target_column.clone()).collect();
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            source_indices
                .iter()
                .map(|idx| {
                    idx.and_then(|i| row.get(i))
                        .cloned()
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    debug!(
        input_columns = table.headers.len(),
        output_columns = headers.len(),
        rows = rows.len(),
        "applied column mapping"
    );
    CsvTable { headers, rows }
}

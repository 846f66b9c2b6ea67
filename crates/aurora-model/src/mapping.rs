//! Column mapping types for import workflows.
//!
//! A mapping pairs a column from an imported file with a column of the
//! destination table. Auto-mapped entries carry a confidence score;
//! manual entries carry none.

use serde::{Deserialize, Serialize};

/// A single source-to-target column assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// Column name from the imported file.
    pub source_column: String,
    /// Destination column name. Empty when the source stays unmapped.
    pub target_column: String,
    /// True when the mapping represents a column to be created rather
    /// than matched against the existing schema.
    #[serde(default)]
    pub is_new: bool,
    /// Similarity score (0.0 to 1.0) when auto-matched; `None` for
    /// manual mappings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl ColumnMapping {
    /// Create a manual mapping with no confidence score.
    #[must_use]
    pub fn manual(source: &str, target: &str) -> Self {
        Self {
            source_column: source.to_string(),
            target_column: target.to_string(),
            is_new: false,
            confidence: None,
        }
    }

    /// True when the entry actually points at a target column.
    #[must_use]
    pub fn is_mapped(&self) -> bool {
        !self.target_column.is_empty()
    }
}

/// Statistics about a source column's values.
///
/// Computed during ingest and used to qualify mapping confidence and
/// type inference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnHint {
    /// True if every non-empty value parses as a number.
    pub is_numeric: bool,
    /// Ratio of distinct non-empty values to non-empty values (0.0 to 1.0).
    pub unique_ratio: f64,
    /// Ratio of empty values to total rows (0.0 to 1.0).
    pub null_ratio: f64,
    /// Optional label from source metadata.
    pub label: Option<String>,
}

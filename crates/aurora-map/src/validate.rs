//! Pre-import validation of a proposed column mapping.

use std::collections::BTreeMap;

use aurora_model::{ColumnMapping, ColumnSchema};

/// Outcome of validating a mapping against the destination schema.
#[derive(Debug, Clone, Default)]
pub struct MappingReport {
    /// Problems that must be fixed before import.
    pub errors: Vec<String>,
    /// Issues worth reviewing that do not block import.
    pub warnings: Vec<String>,
}

impl MappingReport {
    /// Whether the mapping can be imported as-is.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check a mapping for unfilled required targets, duplicate targets,
/// and low-confidence or dropped assignments.
#[must_use]
pub fn validate_mapping(mappings: &[ColumnMapping], schema: &[ColumnSchema]) -> MappingReport {
    let mut report = MappingReport::default();

    for target in schema.iter().filter(|t| t.is_required) {
        let filled = mappings
            .iter()
            .any(|m| m.is_mapped() && m.target_column == target.name);
        if !filled {
            report
                .errors
                .push(format!("required column \"{}\" is not mapped", target.name));
        }
    }

    let mut by_target: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for mapping in mappings.iter().filter(|m| m.is_mapped()) {
        by_target
            .entry(mapping.target_column.as_str())
            .or_default()
            .push(mapping.source_column.as_str());
    }
    for (target, sources) in &by_target {
        if sources.len() > 1 {
            report.errors.push(format!(
                "target column \"{target}\" is mapped from multiple sources: {}",
                sources.join(", ")
            ));
        }
    }

    for mapping in mappings {
        match mapping.confidence {
            Some(c) if mapping.is_mapped() && c < 0.7 => {
                report.warnings.push(format!(
                    "mapping \"{}\" -> \"{}\" has low confidence ({c:.2})",
                    mapping.source_column, mapping.target_column
                ));
            }
            _ if !mapping.is_mapped() => {
                report.warnings.push(format!(
                    "source column \"{}\" will not be imported",
                    mapping.source_column
                ));
            }
            _ => {}
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use aurora_model::ColumnType;

    use super::*;

    fn mapping(source: &str, target: &str, confidence: Option<f64>) -> ColumnMapping {
        ColumnMapping {
            source_column: source.to_string(),
            target_column: target.to_string(),
            is_new: false,
            confidence,
        }
    }

    #[test]
    fn unfilled_required_target_is_an_error() {
        let mut schema = vec![ColumnSchema::new("email", ColumnType::Email)];
        schema[0].is_required = true;
        let report = validate_mapping(&[], &schema);
        assert!(!report.is_valid());
        assert!(report.errors[0].contains("email"));
    }

    #[test]
    fn duplicate_target_is_an_error() {
        let schema = vec![ColumnSchema::new("name", ColumnType::Text)];
        let mappings = vec![
            mapping("first", "name", None),
            mapping("last", "name", None),
        ];
        let report = validate_mapping(&mappings, &schema);
        assert!(!report.is_valid());
        assert!(report.errors[0].contains("multiple sources"));
    }

    #[test]
    fn low_confidence_warns_without_blocking() {
        let schema = vec![ColumnSchema::new("name", ColumnType::Text)];
        let mappings = vec![mapping("nm", "name", Some(0.62))];
        let report = validate_mapping(&mappings, &schema);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("low confidence"));
    }

    #[test]
    fn dropped_source_warns() {
        let report = validate_mapping(&[mapping("extra", "", Some(0.0))], &[]);
        assert!(report.is_valid());
        assert!(report.warnings[0].contains("will not be imported"));
    }

    #[test]
    fn clean_mapping_passes() {
        let mut schema = vec![ColumnSchema::new("email", ColumnType::Email)];
        schema[0].is_required = true;
        let report = validate_mapping(&[mapping("email", "email", Some(1.0))], &schema);
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }
}

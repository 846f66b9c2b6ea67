//! Formula validation and dependency analysis.

use std::collections::BTreeMap;

use aurora_model::{ColumnType, TokenType, Value};

use crate::eval::evaluate;
use crate::lexer::tokenize;
use crate::parse::parse;

/// Outcome of validating a formula definition.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
}

impl ValidationReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Column names a formula reads: `{…}` references and bare
/// identifiers, deduplicated in first-seen order.
#[must_use]
pub fn extract_column_references(formula: &str) -> Vec<String> {
    let mut refs: Vec<String> = Vec::new();
    for token in tokenize(formula) {
        let name = match token.token_type {
            TokenType::Column => token
                .value
                .trim_start_matches('{')
                .trim_end_matches('}')
                .to_string(),
            TokenType::Text if is_identifier(&token.value) => {
                if token.value == "true" || token.value == "false" {
                    continue;
                }
                token.value
            }
            _ => continue,
        };
        if !refs.contains(&name) {
            refs.push(name);
        }
    }
    refs
}

/// Validate a formula expression against its declared dependencies.
///
/// Reports an empty expression, parse failures, dependencies declared
/// but never read, and columns read but not declared. Dependency
/// checks only run when `dependencies` is non-empty.
#[must_use]
pub fn validate(formula: &str, dependencies: &[String]) -> ValidationReport {
    let mut report = ValidationReport::default();

    if formula.trim().is_empty() {
        report.errors.push("formula expression is empty".to_string());
        return report;
    }

    if let Err(error) = parse(formula) {
        report.errors.push(format!("parse error: {error}"));
    }

    if !dependencies.is_empty() {
        let used = extract_column_references(formula);
        let unused: Vec<&str> = dependencies
            .iter()
            .filter(|dep| !used.contains(*dep))
            .map(String::as_str)
            .collect();
        if !unused.is_empty() {
            report
                .errors
                .push(format!("unused dependencies: {}", unused.join(", ")));
        }
        let missing: Vec<&str> = used
            .iter()
            .filter(|col| !dependencies.contains(col))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            report
                .errors
                .push(format!("missing dependencies: {}", missing.join(", ")));
        }
    }

    report
}

/// Infer the column type a formula's result would be stored under by
/// evaluating it against a sample context. Failures infer text.
#[must_use]
pub fn infer_result_type(formula: &str, context: &BTreeMap<String, Value>) -> ColumnType {
    match evaluate(formula, context) {
        Ok(value) => value.column_type(),
        Err(_) => ColumnType::Text,
    }
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

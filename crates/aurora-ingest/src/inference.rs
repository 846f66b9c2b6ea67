//! Column type inference from sampled cell values.

use aurora_model::{ColumnSchema, ColumnType};
use chrono::NaiveDate;
use tracing::debug;

use crate::csv_table::CsvTable;

/// How many non-empty values to sample per column.
const SAMPLE_SIZE: usize = 100;

/// Fraction of sampled values that must match for a type to win.
const MATCH_RATIO: f64 = 0.8;

/// Infer the type of a column from its values.
///
/// Checks run in fixed priority order so that the more specific type
/// wins: email, url, date, phone, number, boolean, and text as the
/// fallback. A type is accepted when at least 80% of the sampled
/// non-empty values match it; an all-empty column is text.
#[must_use]
pub fn infer_column_type<'a, I>(values: I) -> ColumnType
where
    I: IntoIterator<Item = &'a str>,
{
    let samples: Vec<&str> = values
        .into_iter()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .take(SAMPLE_SIZE)
        .collect();
    if samples.is_empty() {
        return ColumnType::Text;
    }

    let checks: [(ColumnType, fn(&str) -> bool); 6] = [
        (ColumnType::Email, is_email),
        (ColumnType::Url, is_url),
        (ColumnType::Date, is_date),
        (ColumnType::Phone, is_phone),
        (ColumnType::Number, is_number),
        (ColumnType::Boolean, is_boolean),
    ];
    for (column_type, check) in checks {
        let matching = samples.iter().filter(|v| check(v)).count();
        if matching as f64 / samples.len() as f64 >= MATCH_RATIO {
            return column_type;
        }
    }
    ColumnType::Text
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.contains(char::is_whitespace)
        && !domain.contains('@')
}

fn is_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    matches!(rest, Some(rest) if !rest.is_empty() && !rest.contains(char::is_whitespace))
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y", "%Y/%m/%d", "%d.%m.%Y"];

fn is_date(value: &str) -> bool {
    DATE_FORMATS
        .iter()
        .any(|fmt| NaiveDate::parse_from_str(value, fmt).is_ok())
}

fn is_phone(value: &str) -> bool {
    // A leading `+` counts toward the 7..=20 length window.
    let cleaned: String = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
        .collect();
    (7..=20).contains(&cleaned.len())
        && cleaned
            .strip_prefix('+')
            .unwrap_or(&cleaned)
            .chars()
            .all(|c| c.is_ascii_digit())
}

fn is_number(value: &str) -> bool {
    value.parse::<f64>().is_ok()
}

fn is_boolean(value: &str) -> bool {
    matches!(
        value.to_lowercase().as_str(),
        "true" | "false" | "yes" | "no" | "y" | "n" | "0" | "1"
    )
}

/// Propose schema columns for table headers the schema lacks.
///
/// Matching against `existing` is by exact name; the proposed type
/// comes from [`infer_column_type`] and a column is marked required
/// when every row has a value for it.
#[must_use]
pub fn suggest_schema(table: &CsvTable, existing: &[ColumnSchema]) -> Vec<ColumnSchema> {
    let mut suggested = Vec::new();
    for header in &table.headers {
        if existing.iter().any(|c| &c.name == header) {
            continue;
        }
        let Some(values) = table.column(header) else {
            continue;
        };
        let column_type = infer_column_type(values.iter().copied());
        let all_filled =
            !table.rows.is_empty() && values.iter().all(|v| !v.trim().is_empty());
        let mut column = ColumnSchema::new(header, column_type);
        column.is_required = all_filled;
        debug!(column = %header, column_type = %column.column_type, "suggested schema column");
        suggested.push(column);
    }
    suggested
}

#[cfg(test)]
mod tests {
    use super::*;

    fn infer(values: &[&str]) -> ColumnType {
        infer_column_type(values.iter().copied())
    }

    #[test]
    fn email_wins_over_text() {
        assert_eq!(
            infer(&["a@example.com", "b@test.org", "c@mail.co.uk"]),
            ColumnType::Email
        );
    }

    #[test]
    fn url_detection() {
        assert_eq!(
            infer(&["https://example.com", "http://test.org/page"]),
            ColumnType::Url
        );
        assert_eq!(infer(&["ftp://example.com"]), ColumnType::Text);
    }

    #[test]
    fn date_formats() {
        assert_eq!(infer(&["2024-01-15", "2024-02-20"]), ColumnType::Date);
        assert_eq!(infer(&["01/15/2024", "02/20/2024"]), ColumnType::Date);
    }

    #[test]
    fn phone_needs_enough_digits() {
        assert_eq!(
            infer(&["+1 (555) 123-4567", "555-987-6543"]),
            ColumnType::Phone
        );
        assert_eq!(infer(&["12345"]), ColumnType::Number);
        // 16 to 20 significant characters still qualify.
        assert_eq!(
            infer(&["1234 5678 9012 3456", "+123 4567 8901 2345 678"]),
            ColumnType::Phone
        );
        // 21 does not.
        assert_eq!(infer(&["123456789012345678901"]), ColumnType::Number);
        // The `+` itself counts, so six digits behind it still pass.
        assert_eq!(infer(&["+123456"]), ColumnType::Phone);
    }

    #[test]
    fn number_beats_boolean_for_zero_one() {
        // "0"/"1" parse as numbers, and number is checked first.
        assert_eq!(infer(&["0", "1", "0", "1"]), ColumnType::Number);
        assert_eq!(infer(&["yes", "no", "yes"]), ColumnType::Boolean);
        assert_eq!(infer(&["TRUE", "false"]), ColumnType::Boolean);
    }

    #[test]
    fn majority_rules_with_dirty_values() {
        // 4 of 5 are emails, which clears the 80% bar.
        assert_eq!(
            infer(&["a@x.com", "b@x.com", "c@x.com", "d@x.com", "n/a"]),
            ColumnType::Email
        );
        // 3 of 5 does not.
        assert_eq!(
            infer(&["a@x.com", "b@x.com", "c@x.com", "n/a", "-"]),
            ColumnType::Text
        );
    }

    #[test]
    fn empty_column_is_text() {
        assert_eq!(infer(&[]), ColumnType::Text);
        assert_eq!(infer(&["", "  "]), ColumnType::Text);
    }

    #[test]
    fn suggest_schema_skips_known_columns() {
        let table = CsvTable::from_reader(
            "name,email,age\nAda,ada@x.com,36\nAlan,alan@x.com,\n".as_bytes(),
        )
        .unwrap();
        let existing = vec![ColumnSchema::new("name", ColumnType::Text)];

        let suggested = suggest_schema(&table, &existing);
        assert_eq!(suggested.len(), 2);
        assert_eq!(suggested[0].name, "email");
        assert_eq!(suggested[0].column_type, ColumnType::Email);
        assert!(suggested[0].is_required);
        assert_eq!(suggested[1].name, "age");
        assert_eq!(suggested[1].column_type, ColumnType::Number);
        assert!(!suggested[1].is_required);
    }
}

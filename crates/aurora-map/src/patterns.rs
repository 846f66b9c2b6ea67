//! Name-pattern fallbacks for first-pass mapping of well-known columns.

use aurora_model::{ColumnMapping, ColumnSchema};

use crate::score::normalize_key;

/// Target name and the normalized substrings that imply it.
#[derive(Debug, Clone, Copy)]
pub struct NamePattern {
    /// Target column this pattern maps onto.
    pub target: &'static str,
    /// Normalized substrings that indicate the target.
    pub hints: &'static [&'static str],
}

/// Patterns for columns that show up in most imported files.
pub const DEFAULT_PATTERNS: &[NamePattern] = &[
    NamePattern {
        target: "id",
        hints: &["id", "key", "code"],
    },
    NamePattern {
        target: "name",
        hints: &["name", "title", "label"],
    },
    NamePattern {
        target: "email",
        hints: &["email", "mail"],
    },
    NamePattern {
        target: "phone",
        hints: &["phone", "tel", "mobile"],
    },
    NamePattern {
        target: "date",
        hints: &["date", "time", "created", "updated"],
    },
    NamePattern {
        target: "description",
        hints: &["description", "desc", "notes", "comment"],
    },
];

/// First-pass mapping by exact normalized name, then name patterns.
///
/// Every source gets an entry: exact matches at confidence 1.0,
/// pattern hits at 0.9, the rest with an empty target and confidence
/// 0. Only targets present in `schema` are ever suggested.
#[must_use]
pub fn default_mapping(sources: &[String], schema: &[ColumnSchema]) -> Vec<ColumnMapping> {
    sources
        .iter()
        .map(|source| {
            let key = normalize_key(source);

            let exact = schema.iter().find(|t| normalize_key(&t.name) == key);
            if let Some(target) = exact {
                return ColumnMapping {
                    source_column: source.clone(),
                    target_column: target.name.clone(),
                    is_new: false,
                    confidence: Some(1.0),
                };
            }

            let pattern_hit = DEFAULT_PATTERNS
                .iter()
                .filter(|p| schema.iter().any(|t| t.name == p.target))
                .find(|p| p.hints.iter().any(|h| key.contains(h)));
            if let Some(pattern) = pattern_hit {
                return ColumnMapping {
                    source_column: source.clone(),
                    target_column: pattern.target.to_string(),
                    is_new: false,
                    confidence: Some(0.9),
                };
            }

            ColumnMapping {
                source_column: source.clone(),
                target_column: String::new(),
                is_new: false,
                confidence: Some(0.0),
            }
        })
        .collect()
}

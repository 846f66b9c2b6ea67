//! Greedy auto-mapping of source columns onto a destination schema.

use std::collections::BTreeSet;

use aurora_model::{ColumnMapping, ColumnSchema};
use tracing::debug;

use crate::score::{boosted_similarity, similarity};

/// Score a source/target pair must strictly exceed to be auto-mapped.
pub const ACCEPT_THRESHOLD: f64 = 0.6;

/// Result of one auto-mapping pass.
#[derive(Debug, Clone, Default)]
pub struct AutoMapOutcome {
    /// Accepted mappings, in source-column order.
    pub mappings: Vec<ColumnMapping>,
    /// Source columns with no qualifying target, in input order.
    pub unmapped_source: Vec<String>,
    /// Target columns no source claimed, in schema order.
    pub unmapped_target: Vec<String>,
}

/// Map source columns onto targets by name similarity.
///
/// Greedy and order-sensitive by design: sources are visited in input
/// order, each claiming the highest-scoring unclaimed target whose
/// score strictly exceeds [`ACCEPT_THRESHOLD`]. Ties go to the target
/// seen first in schema order, and a claimed target is gone for every
/// later source, so earlier sources win contested targets. This is not
/// a maximum-weight matching and must stay that way: replacing it
/// with an optimal assignment would change which source wins.
#[must_use]
pub fn auto_map(sources: &[String], targets: &[ColumnSchema]) -> AutoMapOutcome {
    auto_map_with_threshold(sources, targets, ACCEPT_THRESHOLD)
}

/// [`auto_map`] with a caller-chosen acceptance threshold.
#[must_use]
pub fn auto_map_with_threshold(
    sources: &[String],
    targets: &[ColumnSchema],
    threshold: f64,
) -> AutoMapOutcome {
    let mut mappings = Vec::new();
    let mut claimed: BTreeSet<&str> = BTreeSet::new();

    for source in sources {
        let mut best: Option<(&str, f64)> = None;
        for target in targets {
            if claimed.contains(target.name.as_str()) {
                continue;
            }
            let score = similarity(source, &target.name);
            if score > threshold && best.is_none_or(|(_, s)| score > s) {
                best = Some((target.name.as_str(), score));
            }
        }
        if let Some((target, score)) = best {
            claimed.insert(target);
            mappings.push(ColumnMapping {
                source_column: source.clone(),
                target_column: target.to_string(),
                is_new: false,
                confidence: Some(score),
            });
        }
    }

    let mapped_sources: BTreeSet<&str> = mappings
        .iter()
        .map(|m| m.source_column.as_str())
        .collect();
    let unmapped_source: Vec<String> = sources
        .iter()
        .filter(|s| !mapped_sources.contains(s.as_str()))
        .cloned()
        .collect();
    let unmapped_target: Vec<String> = targets
        .iter()
        .filter(|t| !claimed.contains(t.name.as_str()))
        .map(|t| t.name.clone())
        .collect();

    debug!(
        mapped = mappings.len(),
        unmapped_source = unmapped_source.len(),
        unmapped_target = unmapped_target.len(),
        "auto-mapping pass complete"
    );

    AutoMapOutcome {
        mappings,
        unmapped_source,
        unmapped_target,
    }
}

/// Per-source suggestions without target claiming.
///
/// Every source gets an entry: the best target at or above `threshold`
/// (boosted scoring), or an empty target with confidence 0 when none
/// qualifies. Unlike [`auto_map`], two sources may point at the same
/// target; this feeds review UIs, not final assignments.
#[must_use]
pub fn suggest_mapping(
    sources: &[String],
    targets: &[ColumnSchema],
    threshold: f64,
) -> Vec<ColumnMapping> {
    sources
        .iter()
        .map(|source| {
            let mut best: Option<(&str, f64)> = None;
            for target in targets {
                let score = boosted_similarity(source, &target.name);
                if score >= threshold && best.is_none_or(|(_, s)| score > s) {
                    best = Some((target.name.as_str(), score));
                }
            }
            match best {
                Some((target, score)) => ColumnMapping {
                    source_column: source.clone(),
                    target_column: target.to_string(),
                    is_new: false,
                    confidence: Some(score),
                },
                None => ColumnMapping {
                    source_column: source.clone(),
                    target_column: String::new(),
                    is_new: false,
                    confidence: Some(0.0),
                },
            }
        })
        .collect()
}

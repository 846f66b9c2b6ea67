//! Mapping session state for interactive mapping workflows.
//!
//! Tracks the current set of source/target assignments plus the derived
//! unmapped-column lists and progress counters the review UI renders.

use aurora_model::{ColumnMapping, ColumnSchema};
use tracing::debug;

use crate::engine::{self, AutoMapOutcome};

/// State of one column-mapping session.
///
/// Mutations go through [`set_mapping`](Self::set_mapping),
/// [`remove_mapping`](Self::remove_mapping) and
/// [`auto_map`](Self::auto_map); the unmapped lists are recomputed on
/// every mutation so readers never see them stale.
#[derive(Debug, Clone)]
pub struct MappingState {
    sources: Vec<String>,
    targets: Vec<ColumnSchema>,
    mappings: Vec<ColumnMapping>,
    unmapped_source: Vec<String>,
    unmapped_target: Vec<String>,
}

impl MappingState {
    /// Create a fresh session with no assignments.
    #[must_use]
    pub fn new(sources: Vec<String>, targets: Vec<ColumnSchema>) -> Self {
        let mut state = Self {
            sources,
            targets,
            mappings: Vec::new(),
            unmapped_source: Vec::new(),
            unmapped_target: Vec::new(),
        };
        state.sync_unmapped();
        state
    }

    /// Replace the session's sources and targets, keeping assignments
    /// whose source column still exists.
    pub fn recompute(&mut self, sources: Vec<String>, targets: Vec<ColumnSchema>) {
        self.sources = sources;
        self.targets = targets;
        self.mappings
            .retain(|m| self.sources.contains(&m.source_column));
        self.sync_unmapped();
    }

    /// Replace all assignments with a fresh greedy auto-mapping pass.
    pub fn auto_map(&mut self) -> &[ColumnMapping] {
        let AutoMapOutcome { mappings, .. } = engine::auto_map(&self.sources, &self.targets);
        debug!(mapped = mappings.len(), "auto-map replaced session mappings");
        self.mappings = mappings;
        self.sync_unmapped();
        &self.mappings
    }

    /// Assign `source` to `target`, replacing any existing assignment
    /// for that source. Manual assignments carry no confidence.
    ///
    /// Target uniqueness is deliberately not enforced here: two sources
    /// may point at the same target, and [`crate::validate_mapping`]
    /// reports the duplicate instead.
    pub fn set_mapping(&mut self, source: &str, target: &str) {
        self.mappings.retain(|m| m.source_column != source);
        self.mappings.push(ColumnMapping::manual(source, target));
        self.sync_unmapped();
    }

    /// Drop the assignment for `source`, if any. Returns whether one
    /// was removed.
    pub fn remove_mapping(&mut self, source: &str) -> bool {
        let before = self.mappings.len();
        self.mappings.retain(|m| m.source_column != source);
        let removed = self.mappings.len() != before;
        if removed {
            self.sync_unmapped();
        }
        removed
    }

    /// Current assignments, in insertion order (auto-mapped entries in
    /// source order, manual entries after).
    #[must_use]
    pub fn mappings(&self) -> &[ColumnMapping] {
        &self.mappings
    }

    /// Source columns with no assignment, in input order.
    #[must_use]
    pub fn unmapped_source(&self) -> &[String] {
        &self.unmapped_source
    }

    /// Target columns no source points at, in schema order.
    #[must_use]
    pub fn unmapped_target(&self) -> &[String] {
        &self.unmapped_target
    }

    /// Number of sources currently assigned to a non-empty target.
    #[must_use]
    pub fn mapped_count(&self) -> usize {
        self.mappings.iter().filter(|m| m.is_mapped()).count()
    }

    /// Total number of source columns in the session.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.sources.len()
    }

    /// Percentage of sources mapped, 0.0 to 100.0.
    ///
    /// NaN for a session with zero source columns; callers rendering
    /// the value should prefer [`progress_label`](Self::progress_label)
    /// which sidesteps the division.
    #[must_use]
    pub fn progress(&self) -> f64 {
        100.0 * self.mapped_count() as f64 / self.total_count() as f64
    }

    /// Progress as a "mapped/total" label.
    #[must_use]
    pub fn progress_label(&self) -> String {
        format!("{}/{}", self.mapped_count(), self.total_count())
    }

    fn sync_unmapped(&mut self) {
        self.unmapped_source = self
            .sources
            .iter()
            .filter(|s| {
                !self
                    .mappings
                    .iter()
                    .any(|m| m.is_mapped() && &m.source_column == *s)
            })
            .cloned()
            .collect();
        self.unmapped_target = self
            .targets
            .iter()
            .filter(|t| !self.mappings.iter().any(|m| m.target_column == t.name))
            .map(|t| t.name.clone())
            .collect();
    }
}

/// Banding of an assignment's confidence for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceLevel {
    /// Assigned by hand, no score attached.
    Manual,
    /// Score below 0.7.
    Low,
    /// Score in [0.7, 0.9).
    Medium,
    /// Score of 0.9 or above.
    High,
}

impl ConfidenceLevel {
    /// Band a mapping's confidence score.
    #[must_use]
    pub fn of(mapping: &ColumnMapping) -> Self {
        match mapping.confidence {
            None => Self::Manual,
            Some(c) if c >= 0.9 => Self::High,
            Some(c) if c >= 0.7 => Self::Medium,
            Some(_) => Self::Low,
        }
    }
}

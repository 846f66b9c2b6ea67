//! Fuzzy mapping of imported file columns onto a destination schema.
//!
//! [`auto_map`] does a one-shot greedy assignment; [`MappingState`]
//! wraps it for interactive sessions where the user overrides and
//! removes assignments; [`validate_mapping`] gates the final import.

pub mod engine;
pub mod patterns;
pub mod score;
pub mod state;
pub mod validate;

pub use engine::{ACCEPT_THRESHOLD, AutoMapOutcome, auto_map, auto_map_with_threshold, suggest_mapping};
pub use patterns::{DEFAULT_PATTERNS, default_mapping};
pub use score::{boosted_similarity, normalize_key, similarity};
pub use state::{ConfidenceLevel, MappingState};
pub use validate::{MappingReport, validate_mapping};

//! Name similarity scoring.
//!
//! Two scoring functions share the Levenshtein kernel:
//! [`similarity`] drives auto-mapping and is deliberately plain;
//! [`boosted_similarity`] adds substring and common-prefix boosts for
//! the looser per-column suggestion path.

use rapidfuzz::distance::levenshtein;

/// Similarity of two column names, in `[0, 1]`.
///
/// Lowercased and trimmed: exact equality scores 1.0; equality after
/// stripping non-alphanumerics scores 0.9; otherwise
/// `1 - distance / max_len` over the lowercased trimmed strings.
/// Two empty strings score 1.0.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    let s1 = a.trim().to_lowercase();
    let s2 = b.trim().to_lowercase();

    if s1 == s2 {
        return 1.0;
    }

    if strip_non_alphanumeric(&s1) == strip_non_alphanumeric(&s2) {
        return 0.9;
    }

    let len1 = s1.chars().count();
    let len2 = s2.chars().count();
    let max_len = len1.max(len2);
    if max_len == 0 {
        // Unreachable after the equality check, kept as an explicit guard.
        return 1.0;
    }

    let distance = levenshtein::distance(s1.chars(), s2.chars());
    1.0 - distance as f64 / max_len as f64
}

/// Looser similarity over aggressively normalized names.
///
/// Normalizes both sides down to alphanumerics, then:
/// - both empty → 0.0, equal → 1.0;
/// - one containing the other → at least 0.7, scaled by length ratio;
/// - otherwise Levenshtein ratio, boosted by up to 0.2 for a shared
///   prefix of three or more characters, capped at 1.0.
#[must_use]
pub fn boosted_similarity(a: &str, b: &str) -> f64 {
    let n1 = normalize_key(a);
    let n2 = normalize_key(b);

    if n1.is_empty() && n2.is_empty() {
        return 0.0;
    }
    if n1 == n2 {
        return 1.0;
    }

    let len1 = n1.chars().count();
    let len2 = n2.chars().count();
    let max_len = len1.max(len2);

    if n1.contains(&n2) || n2.contains(&n1) {
        let min_len = len1.min(len2);
        return (min_len as f64 / max_len as f64).max(0.7);
    }

    let prefix_len = n1
        .chars()
        .zip(n2.chars())
        .take_while(|(x, y)| x == y)
        .count();

    let distance = levenshtein::distance(n1.chars(), n2.chars());
    let base = 1.0 - distance as f64 / max_len as f64;

    if prefix_len >= 3 {
        let boost = prefix_len as f64 / max_len as f64 * 0.2;
        return (base + boost).min(1.0);
    }

    base
}

/// Lowercase, trim, and drop everything but ASCII alphanumerics.
#[must_use]
pub fn normalize_key(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

fn strip_non_alphanumeric(s: &str) -> String {
    s.chars().filter(char::is_ascii_alphanumeric).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_names_score_one() {
        assert_eq!(similarity("email", "email"), 1.0);
        assert_eq!(similarity("  Email ", "email"), 1.0);
    }

    #[test]
    fn separator_variants_score_point_nine() {
        assert_eq!(similarity("first_name", "first name"), 0.9);
        assert_eq!(similarity("e-mail", "email"), 0.9);
    }

    #[test]
    fn both_empty_scores_one() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("  ", ""), 1.0);
    }

    #[test]
    fn distance_ratio_for_unrelated_shapes() {
        // "cat" vs "hat": one substitution over length 3.
        let got = similarity("cat", "hat");
        assert!((got - (1.0 - 1.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn disjoint_names_score_low() {
        assert!(similarity("age", "description") < 0.3);
    }

    #[test]
    fn boosted_substring_match_floors_at_point_seven() {
        let got = boosted_similarity("col", "column_name_extended");
        assert!((0.7..1.0).contains(&got));
    }

    #[test]
    fn boosted_common_prefix_raises_score() {
        let plain = similarity("customer_id", "customer_nr");
        let boosted = boosted_similarity("customer_id", "customer_nr");
        assert!(boosted > plain);
        assert!(boosted <= 1.0);
    }

    #[test]
    fn boosted_both_empty_is_zero() {
        assert_eq!(boosted_similarity("--", "__"), 0.0);
    }
}

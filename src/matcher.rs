//! Fuzzy duplicate-name matching
//!
//! Warns when a newly typed supplier, material or product name is close to
//! a name that already exists, so the user can reuse the canonical spelling
//! instead of creating a near-duplicate record.

use crate::names::{CanonicalNameEntry, DuplicateCandidate};
use strsim::levenshtein;
use tracing::debug;

/// Minimum score for an existing name to be reported as similar
pub const SIMILARITY_THRESHOLD: f64 = 0.7;

/// Score given when one normalized name contains the other
pub const CONTAINMENT_SCORE: f64 = 0.8;

/// Candidates shorter than this (whitespace removed) are never checked
pub const MIN_CANDIDATE_CHARS: usize = 2;

/// Most similar names handed to the confirmation step
pub const MAX_SIMILAR_RESULTS: usize = 5;

/// An existing entry that scored at or above the threshold
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarName<'a> {
    pub entry: &'a CanonicalNameEntry,
    pub score: f64,
}

/// Normalize a name for comparison: drop all whitespace and lower-case.
///
/// Only used for scoring. Stored names keep their original spelling.
pub fn normalize_name(name: &str) -> String {
    strip_whitespace(name).to_lowercase()
}

fn strip_whitespace(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Edit distance counted in chars, so Hangul syllables count as one edit
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    levenshtein(a, b)
}

/// Similarity in `[0, 1]` between two raw names
pub fn similarity(a: &str, b: &str) -> f64 {
    normalized_similarity(&normalize_name(a), &normalize_name(b))
}

fn normalized_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.contains(b) || b.contains(a) {
        return CONTAINMENT_SCORE;
    }

    let max_len = a.chars().count().max(b.chars().count());
    1.0 - levenshtein_distance(a, b) as f64 / max_len as f64
}

/// Find every existing name similar to `candidate`, best score first.
///
/// Exact matches (after normalization) are left out: typing an existing
/// name is a reuse, not a duplicate. Ties keep their input order.
pub fn find_similar<'a>(
    candidate: &str,
    existing: &'a [CanonicalNameEntry],
) -> Vec<SimilarName<'a>> {
    // Length is taken before lower-casing, which can add chars
    let stripped = strip_whitespace(candidate);
    if stripped.chars().count() < MIN_CANDIDATE_CHARS {
        debug!("Skipping similarity check for short name '{}'", candidate);
        return Vec::new();
    }
    let normalized = stripped.to_lowercase();

    let mut matches: Vec<SimilarName<'a>> = existing
        .iter()
        .filter_map(|entry| {
            let other = normalize_name(&entry.name);
            // Blank names would "contain" anything
            if other.is_empty() || other == normalized {
                return None;
            }
            let score = normalized_similarity(&normalized, &other);
            (score >= SIMILARITY_THRESHOLD).then_some(SimilarName { entry, score })
        })
        .collect();

    matches.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    matches
}

/// Existing entry that is the same name as `candidate` once whitespace and
/// case are ignored. Such a name is a reuse, never a new record.
pub fn find_same_name<'a>(
    candidate: &str,
    existing: &'a [CanonicalNameEntry],
) -> Option<&'a CanonicalNameEntry> {
    let normalized = normalize_name(candidate);
    if normalized.is_empty() {
        return None;
    }
    existing
        .iter()
        .find(|entry| normalize_name(&entry.name) == normalized)
}

/// Build the duplicate warning for a typed name, capped at
/// [`MAX_SIMILAR_RESULTS`] entries.
pub fn find_duplicates(candidate: &str, existing: &[CanonicalNameEntry]) -> DuplicateCandidate {
    let similar_items: Vec<CanonicalNameEntry> = find_similar(candidate, existing)
        .into_iter()
        .take(MAX_SIMILAR_RESULTS)
        .map(|m| m.entry.clone())
        .collect();

    if !similar_items.is_empty() {
        debug!(
            "'{}' resembles {} existing name(s)",
            candidate,
            similar_items.len()
        );
    }

    DuplicateCandidate {
        input_name: candidate.to_string(),
        similar_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(names: &[&str]) -> Vec<CanonicalNameEntry> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| CanonicalNameEntry::new((i + 1).to_string(), *name))
            .collect()
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("ABC  Flower"), "abcflower");
        assert_eq!(normalize_name(" 장미\t농장 \n"), "장미농장");
        assert_eq!(normalize_name("   "), "");
    }

    #[test]
    fn test_levenshtein_counts_chars() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("장미", "장비"), 1);
    }

    #[test]
    fn test_exact_score() {
        assert_eq!(similarity("ABC  Flower", "abcflower"), 1.0);
    }

    #[test]
    fn test_containment_is_symmetric() {
        assert_eq!(similarity("Flower", "Flower Shop"), CONTAINMENT_SCORE);
        assert_eq!(similarity("Flower Shop", "Flower"), CONTAINMENT_SCORE);
    }

    #[test]
    fn test_levenshtein_score() {
        let score = similarity("cat", "bat");
        assert!((score - (1.0 - 1.0 / 3.0)).abs() < 1e-9);
        let existing = entries(&["bat"]);
        assert!(find_similar("cat", &existing).is_empty());
    }

    #[test]
    fn test_threshold_boundary() {
        // 3 edits over 10 chars scores exactly 0.7
        assert_eq!(similarity("abcdefghij", "abcdefgxyz"), 0.7);
        let existing = entries(&["abcdefgxyz"]);
        let hits = find_similar("abcdefghij", &existing);
        assert_eq!(hits.len(), 1);

        // 4 edits over 13 chars scores 0.69
        assert!(similarity("abcdefghijklm", "abcdefghixyzw") < SIMILARITY_THRESHOLD);
        let existing = entries(&["abcdefghixyzw"]);
        assert!(find_similar("abcdefghijklm", &existing).is_empty());
    }

    #[test]
    fn test_short_candidate_skipped() {
        let existing = entries(&["a", "ab", "abc"]);
        assert!(find_similar("", &existing).is_empty());
        assert!(find_similar(" a ", &existing).is_empty());
        assert!(find_similar("장", &existing).is_empty());
    }

    #[test]
    fn test_short_candidate_counted_before_lowercase() {
        // "İ" lower-cases to two chars but is a single typed char
        assert_eq!(normalize_name("İ").chars().count(), 2);
        let existing = entries(&["İstanbul Flowers"]);
        assert!(find_similar(" İ ", &existing).is_empty());
    }

    #[test]
    fn test_find_same_name() {
        let existing = entries(&["릴리맥 광화문점", "스타플로리스트"]);
        let same = find_same_name("릴리맥광화문점", &existing).map(|e| e.id.as_str());
        assert_eq!(same, Some("1"));
        assert_eq!(find_same_name("릴리맥 강남점", &existing), None);
        let blank = entries(&[""]);
        assert_eq!(find_same_name("  ", &blank), None);
    }

    #[test]
    fn test_exact_match_excluded() {
        let existing = entries(&["릴리맥 광화문점", "스타플로리스트"]);
        assert!(find_similar("릴리맥광화문점", &existing).is_empty());
    }

    #[test]
    fn test_containment_included() {
        let existing = entries(&["장미 농장"]);
        let hits = find_similar("장미농장A", &existing);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].entry.id, "1");
        assert_eq!(hits[0].score, CONTAINMENT_SCORE);
    }

    #[test]
    fn test_blank_existing_names_ignored() {
        let existing = entries(&["", "   "]);
        assert!(find_similar("Flower", &existing).is_empty());
    }

    #[test]
    fn test_sorted_by_score_then_input_order() {
        let existing = entries(&["Flower Shop", "Flower Shops", "flowershop", "Flower Shopx"]);
        let hits = find_similar("Flower Shop ", &existing[1..]);
        // "flowershop" is exact and dropped; the rest are containment ties
        let ids: Vec<&str> = hits.iter().map(|m| m.entry.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "4"]);

        let mixed = entries(&["Rose Farmz Seoul", "Rose Farms", "Tulip Garden"]);
        let hits = find_similar("Rose Farmz", &mixed);
        // one edit in nine (0.89) ranks above containment (0.8)
        let ids: Vec<&str> = hits.iter().map(|m| m.entry.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn test_duplicates_capped() {
        let names: Vec<String> = ('a'..='j').map(|c| format!("Flower House {}", c)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let existing = entries(&refs);

        assert_eq!(find_similar("Flower House", &existing).len(), 10);

        let duplicates = find_duplicates("Flower House", &existing);
        assert_eq!(duplicates.input_name, "Flower House");
        assert_eq!(duplicates.similar_items.len(), MAX_SIMILAR_RESULTS);
        assert_eq!(duplicates.similar_items[0].id, "1");
        assert_eq!(duplicates.similar_items[4].id, "5");
    }

    #[test]
    fn test_near_duplicate_supplier() {
        let existing = entries(&["ABC Flowers", "Green Leaf"]);
        let duplicates = find_duplicates("ABC Flower", &existing);
        assert!(duplicates.has_duplicates());
        assert_eq!(duplicates.similar_items[0].name, "ABC Flowers");
    }
}

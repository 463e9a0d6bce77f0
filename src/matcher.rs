// 🔍 Matcher - Best fuzzy match of a user name against the reference list

use crate::gabarito::ReferenceEntry;
use crate::normalize::TextNormalizer;
use crate::similarity::similarity;

/// Minimum similarity accepted as the same identity
pub const SIMILARITY_THRESHOLD: f64 = 0.75;

// ============================================================================
// MATCH RESULT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestMatch<'a> {
    pub entry: &'a ReferenceEntry,

    /// Index of `entry` in the reference list
    pub index: usize,

    /// Similarity score (0.0 - 1.0)
    pub score: f64,
}

// ============================================================================
// MATCHER
// ============================================================================

/// Reference list with precomputed normalized keys.
///
/// Scoring walks every entry in reference order and keeps the strictly
/// highest score, so on ties the first entry reaching the maximum wins.
pub struct Matcher<'a> {
    entries: &'a [ReferenceEntry],
    keys: Vec<String>,
    threshold: f64,
}

impl<'a> Matcher<'a> {
    pub fn new(entries: &'a [ReferenceEntry], normalizer: &TextNormalizer) -> Self {
        Self::with_threshold(entries, normalizer, SIMILARITY_THRESHOLD)
    }

    pub fn with_threshold(
        entries: &'a [ReferenceEntry],
        normalizer: &TextNormalizer,
        threshold: f64,
    ) -> Self {
        let keys = entries.iter().map(|e| normalizer.normalize(&e.name)).collect();
        Matcher {
            entries,
            keys,
            threshold,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Find the best-scoring entry for an already normalized user name.
    ///
    /// Returns `None` when the best score is below the threshold, even if it
    /// is the unique maximum.
    pub fn find_best_match(&self, normalized_name: &str) -> Option<BestMatch<'a>> {
        let mut best: Option<BestMatch<'a>> = None;

        for (index, (entry, key)) in self.entries.iter().zip(&self.keys).enumerate() {
            let score = similarity(normalized_name, key);
            if best.map_or(true, |b| score > b.score) {
                best = Some(BestMatch { entry, index, score });
            }
        }

        best.filter(|b| b.score >= self.threshold)
    }
}

/// One-shot lookup with the default normalizer and threshold.
pub fn find_best_match<'a>(
    entries: &'a [ReferenceEntry],
    normalized_name: &str,
) -> Option<&'a ReferenceEntry> {
    Matcher::new(entries, &TextNormalizer::new())
        .find_best_match(normalized_name)
        .map(|m| m.entry)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    fn reference() -> Vec<ReferenceEntry> {
        vec![
            ReferenceEntry::new("Reunião Magna"),
            ReferenceEntry::new("Comissões Permanentes"),
            ReferenceEntry::new("Dia dos Pais"),
        ]
    }

    #[test]
    fn test_exact_match_after_normalization() {
        let entries = reference();
        let found = find_best_match(&entries, &normalize("COMISSOES permanentes")).unwrap();
        assert_eq!(found.name, "Comissões Permanentes");
    }

    #[test]
    fn test_typo_tolerated() {
        let entries = reference();
        let matcher = Matcher::new(&entries, &TextNormalizer::new());

        let best = matcher.find_best_match(&normalize("Reuniao Magma")).unwrap();
        assert_eq!(best.entry.name, "Reunião Magna");
        assert_eq!(best.index, 0);
        assert!(best.score > 0.9 && best.score < 1.0);

        println!("✅ Typo match score: {:.3}", best.score);
    }

    #[test]
    fn test_below_threshold_is_none_even_when_unique_best() {
        let entries = vec![ReferenceEntry::new("abcd")];
        // 1 edit in 4 chars → 0.75, accepted
        assert!(find_best_match(&entries, "abcx").is_some());
        // 2 edits in 4 chars → 0.5, rejected
        assert!(find_best_match(&entries, "abxy").is_none());
        assert!(find_best_match(&entries, "").is_none());
    }

    #[test]
    fn test_tie_goes_to_first_entry() {
        let entries = vec![ReferenceEntry::new("abcde"), ReferenceEntry::new("abcdf")];
        let matcher = Matcher::new(&entries, &TextNormalizer::new());

        // One substitution away from both
        let best = matcher.find_best_match("abcdz").unwrap();
        assert_eq!(best.index, 0);
    }

    #[test]
    fn test_custom_threshold() {
        let entries = reference();
        let strict = Matcher::with_threshold(&entries, &TextNormalizer::new(), 1.0);
        assert!(strict.find_best_match(&normalize("Reuniao Magma")).is_none());
        assert!(strict.find_best_match(&normalize("Reunião Magna")).is_some());
        assert_eq!(strict.threshold(), 1.0);
    }

    #[test]
    fn test_empty_reference_list() {
        let entries: Vec<ReferenceEntry> = Vec::new();
        assert!(find_best_match(&entries, "anything").is_none());
    }
}

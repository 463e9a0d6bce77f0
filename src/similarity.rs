// 📏 Similarity Scorer - Normalized edit-distance similarity
// Inputs are expected to be normalized keys (see normalize.rs)

/// Levenshtein distance with unit-cost insert, delete and substitute.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Similarity in `[0, 1]`.
///
/// `1.0` iff `a == b`, otherwise `1 - distance / max(len(a), len(b))`
/// where lengths are counted in characters. Symmetric in its arguments.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }

    let max_len = a.chars().count().max(b.chars().count());
    let distance = levenshtein_distance(a, b);

    1.0 - distance as f64 / max_len as f64
}

// ============================================================================
// TESTS
// ============================================================================

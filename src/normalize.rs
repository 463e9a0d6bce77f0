// 🔤 Text Normalizer - Comparable matching keys for free-text names
// Strips diacritics, folds case, drops punctuation and collapses whitespace

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

// ============================================================================
// NORMALIZER
// ============================================================================

/// Canonicalizes activity names so that "Comissões  Permanentes!" and
/// "comissoes permanentes" produce the same key.
///
/// Two names are the same identity only when their normalized forms are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextNormalizer {
    /// Keep ASCII digits in the output (default: true)
    pub keep_digits: bool,
}

impl TextNormalizer {
    pub fn new() -> Self {
        TextNormalizer { keep_digits: true }
    }

    /// Policy that also removes digits ("Reunião 2" → "reuniao")
    pub fn without_digits() -> Self {
        TextNormalizer { keep_digits: false }
    }

    /// Normalize a free-text name.
    ///
    /// Steps: NFD decomposition, combining marks removed, everything outside
    /// `[A-Za-z0-9 ]` removed, space runs collapsed, trimmed, lower-cased.
    pub fn normalize(&self, text: &str) -> String {
        let filtered: String = text
            .nfd()
            .filter(|c| !is_combining_mark(*c))
            .filter(|c| self.is_allowed(*c))
            .collect();

        filtered
            .split(' ')
            .filter(|word| !word.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_lowercase()
    }

    fn is_allowed(&self, c: char) -> bool {
        c == ' ' || c.is_ascii_alphabetic() || (self.keep_digits && c.is_ascii_digit())
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize with the default policy (digits kept).
pub fn normalize(text: &str) -> String {
    TextNormalizer::new().normalize(text)
}

// ============================================================================
// TESTS
// ============================================================================

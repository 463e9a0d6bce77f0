// ⚖️ Reconciliation Engine - Checklist vs. gabarito
// Pairs user lines into (name, date) entries, matches them against the reference
// list and classifies each one. Every reference entry shows up exactly once in
// the output: either matched by a user entry or reported missing.

use crate::dates::parse_strict_date;
use crate::gabarito::ReferenceEntry;
use crate::matcher::{Matcher, SIMILARITY_THRESHOLD};
use crate::normalize::TextNormalizer;
use crate::outcome::Outcome;
use crate::report::ReportSummary;
use crate::rules::evaluate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

/// Prefix added to chapter labels that don't already name themselves a chapter
pub const DEFAULT_CHAPTER_LABEL: &str = "Capítulo: ";

// ============================================================================
// USER ENTRY
// ============================================================================

/// One (name, date) pair from the user's checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntry {
    pub raw_name: String,
    pub normalized_name: String,
    pub raw_date: String,
}

/// Split raw text into trimmed, non-empty lines and pair them consecutively.
///
/// Returns the pairs and the number of discarded lines (a trailing name with
/// no date after it).
pub fn parse_entries(raw_input: &str, normalizer: &TextNormalizer) -> (Vec<UserEntry>, usize) {
    let lines: Vec<&str> = raw_input
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let entries = lines
        .chunks_exact(2)
        .map(|pair| UserEntry {
            raw_name: pair[0].to_string(),
            normalized_name: normalizer.normalize(pair[0]),
            raw_date: pair[1].to_string(),
        })
        .collect();

    (entries, lines.len() % 2)
}

// ============================================================================
// RECONCILIATION REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub title: String,

    /// User-entry outcomes in input order, then missing entries in reference order
    pub outcomes: Vec<Outcome>,

    /// Lines dropped because they had no partner line
    pub discarded_lines: usize,
}

impl ReconciliationReport {
    pub fn has_errors(&self) -> bool {
        self.outcomes.iter().any(Outcome::is_error)
    }

    pub fn is_compliant(&self) -> bool {
        !self.has_errors()
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary::from_outcomes(&self.outcomes)
    }
}

// ============================================================================
// RECONCILIATION ENGINE
// ============================================================================

pub struct ReconciliationEngine {
    /// Minimum similarity for a fuzzy match (default: 0.75)
    pub similarity_threshold: f64,

    /// Prefix for chapter titles (default: "Capítulo: ")
    pub chapter_label: String,

    /// Normalization policy for names and chapter labels
    pub normalizer: TextNormalizer,
}

impl ReconciliationEngine {
    pub fn new() -> Self {
        ReconciliationEngine {
            similarity_threshold: SIMILARITY_THRESHOLD,
            chapter_label: DEFAULT_CHAPTER_LABEL.to_string(),
            normalizer: TextNormalizer::new(),
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    pub fn with_chapter_label(mut self, label: &str) -> Self {
        self.chapter_label = label.to_string();
        self
    }

    pub fn with_normalizer(mut self, normalizer: TextNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Reconcile a raw checklist against the reference entries.
    ///
    /// Never fails: every problem becomes an `Outcome::Error`.
    ///
    /// Example:
    /// ```
    /// use gabarito_check::{ReconciliationEngine, ReferenceEntry};
    ///
    /// let reference = vec![ReferenceEntry::new("Reunião Magna").with_required_month(3)];
    /// let report = ReconciliationEngine::new().reconcile(&reference, "Alvorada", "Reuniao Magna\n15/03/2025");
    ///
    /// assert_eq!(report.title, "Capítulo: Alvorada");
    /// assert!(report.is_compliant());
    /// ```
    #[instrument(skip_all, fields(capitulo = %capitulo, reference = reference.len()))]
    pub fn reconcile(
        &self,
        reference: &[ReferenceEntry],
        capitulo: &str,
        raw_input: &str,
    ) -> ReconciliationReport {
        let (entries, discarded_lines) = parse_entries(raw_input, &self.normalizer);
        if discarded_lines > 0 {
            warn!(discarded_lines, "trailing line without a date was ignored");
        }

        let matcher = Matcher::with_threshold(reference, &self.normalizer, self.similarity_threshold);
        let mut used: HashSet<&str> = HashSet::new();
        let mut outcomes = Vec::with_capacity(entries.len() + reference.len());

        for entry in &entries {
            outcomes.push(self.classify(&matcher, &mut used, entry));
        }

        // Missing entries, in reference order, once per canonical name
        for r in reference {
            if used.insert(&r.name) {
                outcomes.push(Outcome::missing(&r.name));
            }
        }

        let report = ReconciliationReport {
            title: self.chapter_title(capitulo),
            outcomes,
            discarded_lines,
        };

        let summary = report.summary();
        info!(
            entries = entries.len(),
            ok = summary.ok,
            errors = summary.errors,
            "reconciliation finished"
        );

        report
    }

    fn classify<'a>(
        &self,
        matcher: &Matcher<'a>,
        used: &mut HashSet<&'a str>,
        entry: &UserEntry,
    ) -> Outcome {
        let best = match matcher.find_best_match(&entry.normalized_name) {
            Some(best) => best,
            None => {
                debug!(name = %entry.raw_name, "no reference match");
                return Outcome::not_found(&entry.raw_name);
            }
        };

        debug!(
            name = %entry.raw_name,
            matched = %best.entry.name,
            score = best.score,
            "matched reference entry"
        );

        if !used.insert(&best.entry.name) {
            return Outcome::duplicate(&best.entry.name, &entry.raw_name);
        }

        evaluate(
            best.entry,
            &entry.raw_name,
            parse_strict_date(&entry.raw_date),
            &entry.raw_date,
        )
    }

    /// Title for the report: the label as typed when it already contains the
    /// word "capitulo" (after normalization), otherwise prefixed.
    ///
    /// Punctuation separates words here, so "Capítulo:Alvorada" counts.
    pub fn chapter_title(&self, capitulo: &str) -> String {
        let capitulo = capitulo.trim();
        let spaced: String = capitulo
            .chars()
            .map(|c| if c.is_ascii_punctuation() { ' ' } else { c })
            .collect();
        let normalized = self.normalizer.normalize(&spaced);

        if normalized.split(' ').any(|word| word == "capitulo") {
            capitulo.to_string()
        } else {
            format!("{}{}", self.chapter_label, capitulo)
        }
    }
}

impl Default for ReconciliationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Reconcile with default settings.
pub fn reconcile(reference: &[ReferenceEntry], capitulo: &str, raw_input: &str) -> ReconciliationReport {
    ReconciliationEngine::new().reconcile(reference, capitulo, raw_input)
}

// ============================================================================
// TESTS
// ============================================================================

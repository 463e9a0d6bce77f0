// Gabarito Check - Core Library
// Validates a checklist of (activity, date) pairs against a reference answer key

pub mod normalize;
pub mod dates;
pub mod similarity;
pub mod matcher;
pub mod gabarito;
pub mod outcome;
pub mod rules;
pub mod reconciliation;
pub mod report;

// Only compile logging setup when the CLI feature is enabled
#[cfg(feature = "cli")]
pub mod logging;

// Re-export commonly used types
pub use normalize::{normalize, TextNormalizer};
pub use dates::{format_date, is_valid_date, parse_strict_date, DATE_FORMAT};
pub use similarity::{levenshtein_distance, similarity};
pub use matcher::{find_best_match, BestMatch, Matcher, SIMILARITY_THRESHOLD};
pub use gabarito::{Gabarito, GabaritoError, LoadOptions, ReferenceEntry, DEFAULT_DEADLINE};
pub use outcome::{Outcome, Reason};
pub use rules::{evaluate, DateRule};
pub use reconciliation::{
    parse_entries, reconcile, ReconciliationEngine, ReconciliationReport, UserEntry,
    DEFAULT_CHAPTER_LABEL,
};
pub use report::{render, render_csv, render_json, render_text, GroupedOutcomes, ReportFormat, ReportSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 🏷️ Date Rules - Rules as Data
// Per-entry scheduling constraints (required month, deadline) applied to a parsed date

use crate::gabarito::ReferenceEntry;
use crate::outcome::{Outcome, Reason};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

// ============================================================================
// RULE DEFINITION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateRule {
    /// Date must fall in this month (1-12), any year
    RequiredMonth(u32),

    /// Date must not be after this day
    Deadline(NaiveDate),
}

impl DateRule {
    /// Rules carried by a reference entry, in evaluation order
    pub fn for_entry(entry: &ReferenceEntry) -> Vec<DateRule> {
        let mut rules = Vec::with_capacity(2);

        if let Some(month) = entry.required_month {
            rules.push(DateRule::RequiredMonth(month));
        }

        if let Some(deadline) = entry.deadline {
            rules.push(DateRule::Deadline(deadline));
        }

        rules
    }

    /// Check a date, returning the violation if any
    pub fn check(&self, date: NaiveDate) -> Option<Reason> {
        match *self {
            DateRule::RequiredMonth(month) if date.month() != month => {
                Some(Reason::WrongMonth {
                    required_month: month,
                })
            }
            DateRule::Deadline(deadline) if date > deadline => {
                Some(Reason::PastDeadline { deadline })
            }
            _ => None,
        }
    }
}

// ============================================================================
// RULE EVALUATOR
// ============================================================================

/// Evaluate a matched entry against the user's date.
///
/// A missing `parsed_date` short-circuits to `invalid-date`. Otherwise every
/// rule runs and all violations are accumulated into one outcome.
pub fn evaluate(
    entry: &ReferenceEntry,
    input_name: &str,
    parsed_date: Option<NaiveDate>,
    date_text: &str,
) -> Outcome {
    let date = match parsed_date {
        Some(date) => date,
        None => return Outcome::failed(&entry.name, input_name, vec![Reason::InvalidDate]),
    };

    let violations: Vec<Reason> = DateRule::for_entry(entry)
        .iter()
        .filter_map(|rule| rule.check(date))
        .collect();

    if violations.is_empty() {
        Outcome::ok(&entry.name, date_text)
    } else {
        Outcome::failed(&entry.name, input_name, violations)
    }
}

// ============================================================================
// TESTS
// ============================================================================

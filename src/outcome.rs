// 🏷️ Outcome - Per-entry classification emitted by reconciliation

use crate::dates::format_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// REASON
// ============================================================================

/// Why an entry failed. Rule violations carry the constraint they broke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Reason {
    /// Name has no reference match above the similarity threshold
    NotFound,

    /// Reference entry was already matched earlier in the run
    Duplicate,

    /// Date text is malformed or not a calendar date
    InvalidDate,

    /// Date is outside the entry's required month
    WrongMonth { required_month: u32 },

    /// Date is after the entry's cutoff
    PastDeadline { deadline: NaiveDate },

    /// Reference entry was never supplied
    Missing,
}

impl Reason {
    /// Stable kebab-case code (`not-found`, `wrong-month`, ...)
    pub fn code(&self) -> &'static str {
        match self {
            Reason::NotFound => "not-found",
            Reason::Duplicate => "duplicate",
            Reason::InvalidDate => "invalid-date",
            Reason::WrongMonth { .. } => "wrong-month",
            Reason::PastDeadline { .. } => "past-deadline",
            Reason::Missing => "missing",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::NotFound => write!(f, "atividade não existe no gabarito"),
            Reason::Duplicate => write!(f, "atividade duplicada"),
            Reason::InvalidDate => write!(f, "data inválida"),
            Reason::WrongMonth { required_month } => {
                write!(f, "mês obrigatório {:02}", required_month)
            }
            Reason::PastDeadline { deadline } => {
                write!(f, "prazo máximo {}", format_date(*deadline))
            }
            Reason::Missing => write!(f, "não foi informada"),
        }
    }
}

// ============================================================================
// OUTCOME
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    /// Entry matched and passed every rule
    Ok {
        entry_name: String,
        date: String,
    },

    /// Entry failed. `entry_name` is absent when no reference entry matched;
    /// `input_name` is absent for synthetic `missing` outcomes.
    Error {
        entry_name: Option<String>,
        input_name: Option<String>,
        reasons: Vec<Reason>,
    },
}

impl Outcome {
    pub fn ok(entry_name: &str, date: &str) -> Self {
        Outcome::Ok {
            entry_name: entry_name.to_string(),
            date: date.to_string(),
        }
    }

    pub fn not_found(input_name: &str) -> Self {
        Outcome::Error {
            entry_name: None,
            input_name: Some(input_name.to_string()),
            reasons: vec![Reason::NotFound],
        }
    }

    pub fn duplicate(entry_name: &str, input_name: &str) -> Self {
        Self::failed(entry_name, input_name, vec![Reason::Duplicate])
    }

    pub fn missing(entry_name: &str) -> Self {
        Outcome::Error {
            entry_name: Some(entry_name.to_string()),
            input_name: None,
            reasons: vec![Reason::Missing],
        }
    }

    pub fn failed(entry_name: &str, input_name: &str, reasons: Vec<Reason>) -> Self {
        Outcome::Error {
            entry_name: Some(entry_name.to_string()),
            input_name: Some(input_name.to_string()),
            reasons,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok { .. })
    }

    pub fn is_error(&self) -> bool {
        !self.is_ok()
    }

    /// Canonical reference name, if the outcome is tied to one
    pub fn entry_name(&self) -> Option<&str> {
        match self {
            Outcome::Ok { entry_name, .. } => Some(entry_name),
            Outcome::Error { entry_name, .. } => entry_name.as_deref(),
        }
    }

    /// Name to show: canonical when known, otherwise what the user typed
    pub fn subject(&self) -> &str {
        match self {
            Outcome::Ok { entry_name, .. } => entry_name,
            Outcome::Error {
                entry_name,
                input_name,
                ..
            } => entry_name
                .as_deref()
                .or(input_name.as_deref())
                .unwrap_or_default(),
        }
    }

    pub fn reasons(&self) -> &[Reason] {
        match self {
            Outcome::Ok { .. } => &[],
            Outcome::Error { reasons, .. } => reasons,
        }
    }

    pub fn has_reason(&self, code: &str) -> bool {
        self.reasons().iter().any(|r| r.code() == code)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ok { entry_name, date } => {
                write!(f, "[OK] {} ({}) está correta.", entry_name, date)
            }
            Outcome::Error { reasons, .. } => {
                let joined = reasons
                    .iter()
                    .map(|r| r.to_string())
                    .collect::<Vec<_>>()
                    .join(" e ");
                write!(f, "[ERRO] {}: {}.", self.subject(), joined)
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_codes() {
        assert_eq!(Reason::NotFound.code(), "not-found");
        assert_eq!(Reason::WrongMonth { required_month: 3 }.code(), "wrong-month");
        assert_eq!(
            Reason::PastDeadline {
                deadline: NaiveDate::from_ymd_opt(2025, 8, 31).unwrap()
            }
            .code(),
            "past-deadline"
        );
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Outcome::ok("Reunião Magna", "15/03/2025").to_string(),
            "[OK] Reunião Magna (15/03/2025) está correta."
        );
        assert_eq!(
            Outcome::not_found("Reuniao Mgn Xyz").to_string(),
            "[ERRO] Reuniao Mgn Xyz: atividade não existe no gabarito."
        );
        assert_eq!(
            Outcome::missing("Dia dos Pais").to_string(),
            "[ERRO] Dia dos Pais: não foi informada."
        );

        let both = Outcome::failed(
            "Comissões Permanentes",
            "comissoes permanentes",
            vec![
                Reason::WrongMonth { required_month: 5 },
                Reason::PastDeadline {
                    deadline: NaiveDate::from_ymd_opt(2025, 8, 31).unwrap(),
                },
            ],
        );
        assert_eq!(
            both.to_string(),
            "[ERRO] Comissões Permanentes: mês obrigatório 05 e prazo máximo 31/08/2025."
        );
    }

    #[test]
    fn test_subject_and_entry_name() {
        let not_found = Outcome::not_found("Xpto");
        assert_eq!(not_found.entry_name(), None);
        assert_eq!(not_found.subject(), "Xpto");
        assert!(not_found.is_error());
        assert!(not_found.has_reason("not-found"));

        let dup = Outcome::duplicate("Reunião Magna", "reuniao magna");
        assert_eq!(dup.entry_name(), Some("Reunião Magna"));
        assert_eq!(dup.subject(), "Reunião Magna");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(Outcome::failed(
            "A",
            "a",
            vec![Reason::WrongMonth { required_month: 3 }],
        ))
        .unwrap();

        assert_eq!(json["status"], "error");
        assert_eq!(json["entry_name"], "A");
        assert_eq!(json["reasons"][0]["kind"], "wrong-month");
        assert_eq!(json["reasons"][0]["required_month"], 3);
    }
}

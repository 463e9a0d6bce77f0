// 📋 Gabarito - Reference answer key
// Canonical activity list with per-entry scheduling constraints, loaded once per run
//
// JSON shape:
//   { "atividades": [ { "nome": "Reunião Magna", "mes_obrigatorio": "03" },
//                     { "nome": "Comissões Permanentes", "validacao": true, "prazo": "31/08/2025" } ] }

use crate::dates::parse_strict_date;
use crate::normalize::TextNormalizer;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

/// Load-time failures. Any of these aborts the run before reconciliation starts.
#[derive(Debug, Error)]
pub enum GabaritoError {
    /// Reference file could not be read.
    #[error("failed to read reference data {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reference data is not valid JSON or a record lacks `nome`.
    #[error("failed to parse reference data: {0}")]
    Parse(#[from] serde_json::Error),

    /// `nome` normalizes to nothing, so it could never be matched.
    #[error("reference entry #{index} has an empty name")]
    EmptyName { index: usize },

    /// Two records share the same normalized name.
    #[error("reference entry '{name}' is listed more than once")]
    DuplicateName { name: String },

    #[error("reference entry '{name}' has invalid mes_obrigatorio '{value}'")]
    InvalidMonth { name: String, value: String },

    #[error("reference entry '{name}' has invalid prazo '{value}' (expected DD/MM/YYYY)")]
    InvalidDeadline { name: String, value: String },
}

// ============================================================================
// REFERENCE ENTRY
// ============================================================================

/// Canonical activity definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    /// Canonical label, unique within a gabarito
    pub name: String,

    /// Month (1-12) the activity must happen in
    pub required_month: Option<u32>,

    /// Last accepted date (inclusive)
    pub deadline: Option<NaiveDate>,
}

impl ReferenceEntry {
    pub fn new(name: &str) -> Self {
        ReferenceEntry {
            name: name.to_string(),
            required_month: None,
            deadline: None,
        }
    }

    /// Builder pattern: require a month (1-12)
    pub fn with_required_month(mut self, month: u32) -> Self {
        self.required_month = Some(month);
        self
    }

    /// Builder pattern: add a cutoff date
    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn has_deadline(&self) -> bool {
        self.deadline.is_some()
    }
}

// ============================================================================
// RAW RECORD (wire format)
// ============================================================================

#[derive(Debug, Deserialize)]
struct GabaritoFile {
    atividades: Vec<GabaritoRecord>,
}

#[derive(Debug, Deserialize)]
struct GabaritoRecord {
    nome: String,

    #[serde(default)]
    mes_obrigatorio: Option<String>,

    #[serde(default)]
    validacao: bool,

    #[serde(default)]
    prazo: Option<String>,
}

// ============================================================================
// LOAD OPTIONS
// ============================================================================

#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Cutoff applied to `validacao: true` records without their own `prazo`
    pub default_deadline: NaiveDate,

    /// Policy used for the duplicate-name check
    pub normalizer: TextNormalizer,
}

impl LoadOptions {
    pub fn new() -> Self {
        LoadOptions {
            default_deadline: DEFAULT_DEADLINE,
            normalizer: TextNormalizer::new(),
        }
    }

    pub fn with_default_deadline(mut self, deadline: NaiveDate) -> Self {
        self.default_deadline = deadline;
        self
    }

    pub fn with_normalizer(mut self, normalizer: TextNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Cutoff for `validacao` entries without a `prazo`: 20/12/2025
pub const DEFAULT_DEADLINE: NaiveDate = match NaiveDate::from_ymd_opt(2025, 12, 20) {
    Some(date) => date,
    None => panic!("invalid default deadline"),
};

// ============================================================================
// GABARITO
// ============================================================================

/// Validated, immutable reference list. Order is preserved from the source.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Gabarito {
    entries: Vec<ReferenceEntry>,
}

impl Gabarito {
    /// Build from entries constructed in code
    pub fn from_entries(entries: Vec<ReferenceEntry>) -> Self {
        Gabarito { entries }
    }

    /// Load and validate from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Self, GabaritoError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| GabaritoError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let gabarito = Self::from_json_str(&content, options)?;
        tracing::info!(
            path = %path.display(),
            entries = gabarito.len(),
            "loaded reference data"
        );
        Ok(gabarito)
    }

    /// Load and validate from a JSON document
    pub fn from_json_str(json: &str, options: &LoadOptions) -> Result<Self, GabaritoError> {
        let file: GabaritoFile = serde_json::from_str(json)?;

        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(file.atividades.len());

        for (index, record) in file.atividades.into_iter().enumerate() {
            let key = options.normalizer.normalize(&record.nome);
            if key.is_empty() {
                return Err(GabaritoError::EmptyName { index });
            }
            if !seen.insert(key) {
                return Err(GabaritoError::DuplicateName { name: record.nome });
            }

            entries.push(Self::entry_from_record(record, options)?);
        }

        Ok(Gabarito { entries })
    }

    fn entry_from_record(record: GabaritoRecord, options: &LoadOptions) -> Result<ReferenceEntry, GabaritoError> {
        let required_month = match record.mes_obrigatorio.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => match value.parse::<u32>() {
                Ok(month) if (1..=12).contains(&month) => Some(month),
                _ => {
                    return Err(GabaritoError::InvalidMonth {
                        name: record.nome,
                        value: value.to_string(),
                    })
                }
            },
        };

        let prazo = match record.prazo.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => match parse_strict_date(value) {
                Some(date) => Some(date),
                None => {
                    return Err(GabaritoError::InvalidDeadline {
                        name: record.nome,
                        value: value.to_string(),
                    })
                }
            },
        };

        let deadline = if record.validacao {
            Some(prazo.unwrap_or(options.default_deadline))
        } else {
            None
        };

        Ok(ReferenceEntry {
            name: record.nome,
            required_month,
            deadline,
        })
    }

    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_load_full_document() {
        let json = r#"{
            "atividades": [
                { "nome": "Reunião Magna", "mes_obrigatorio": "03" },
                { "nome": "Comissões Permanentes", "validacao": true, "prazo": "31/08/2025" },
                { "nome": "Dia dos Pais", "validacao": true, "data": "10/08/2025" },
                { "nome": "Campanha do Agasalho" }
            ]
        }"#;

        let gabarito = Gabarito::from_json_str(json, &LoadOptions::new()).unwrap();
        let entries = gabarito.entries();

        assert_eq!(gabarito.len(), 4);
        assert_eq!(entries[0], ReferenceEntry::new("Reunião Magna").with_required_month(3));
        assert_eq!(entries[1].deadline, Some(ymd(2025, 8, 31)));
        assert_eq!(entries[2].deadline, Some(ymd(2025, 12, 20)));
        assert_eq!(entries[3], ReferenceEntry::new("Campanha do Agasalho"));

        println!("✅ Loaded {} reference entries", gabarito.len());
    }

    #[test]
    fn test_default_deadline_constant() {
        assert_eq!(DEFAULT_DEADLINE, ymd(2025, 12, 20));
        assert_eq!(LoadOptions::default().default_deadline, DEFAULT_DEADLINE);
    }

    #[test]
    fn test_record_data_field_ignored() {
        let json = r#"{ "atividades": [ { "nome": "A", "validacao": true, "data": "31/02/2025" } ] }"#;
        let gabarito = Gabarito::from_json_str(json, &LoadOptions::new()).unwrap();
        assert_eq!(gabarito.entries()[0].deadline, Some(DEFAULT_DEADLINE));
    }

    #[test]
    fn test_prazo_ignored_without_validacao() {
        let json = r#"{ "atividades": [ { "nome": "A", "prazo": "01/01/2025" } ] }"#;
        let gabarito = Gabarito::from_json_str(json, &LoadOptions::new()).unwrap();
        assert!(!gabarito.entries()[0].has_deadline());
    }

    #[test]
    fn test_custom_default_deadline() {
        let json = r#"{ "atividades": [ { "nome": "A", "validacao": true } ] }"#;
        let options = LoadOptions::new().with_default_deadline(ymd(2026, 6, 30));
        let gabarito = Gabarito::from_json_str(json, &options).unwrap();
        assert_eq!(gabarito.entries()[0].deadline, Some(ymd(2026, 6, 30)));
    }

    #[test]
    fn test_missing_nome_is_parse_error() {
        let json = r#"{ "atividades": [ { "mes_obrigatorio": "03" } ] }"#;
        let err = Gabarito::from_json_str(json, &LoadOptions::new()).unwrap_err();
        assert!(matches!(err, GabaritoError::Parse(_)));
    }

    #[test]
    fn test_duplicate_names_by_normalized_form() {
        let json = r#"{ "atividades": [ { "nome": "Reunião Magna" }, { "nome": "reuniao  magna!" } ] }"#;
        let err = Gabarito::from_json_str(json, &LoadOptions::new()).unwrap_err();
        assert!(matches!(err, GabaritoError::DuplicateName { ref name } if name == "reuniao  magna!"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let json = r#"{ "atividades": [ { "nome": "A" }, { "nome": " -- " } ] }"#;
        let err = Gabarito::from_json_str(json, &LoadOptions::new()).unwrap_err();
        assert!(matches!(err, GabaritoError::EmptyName { index: 1 }));
    }

    #[test]
    fn test_invalid_month_and_deadline() {
        let json = r#"{ "atividades": [ { "nome": "A", "mes_obrigatorio": "13" } ] }"#;
        let err = Gabarito::from_json_str(json, &LoadOptions::new()).unwrap_err();
        assert!(matches!(err, GabaritoError::InvalidMonth { .. }));

        let json = r#"{ "atividades": [ { "nome": "A", "validacao": true, "prazo": "31/02/2025" } ] }"#;
        let err = Gabarito::from_json_str(json, &LoadOptions::new()).unwrap_err();
        assert!(matches!(err, GabaritoError::InvalidDeadline { .. }));
        assert!(err.to_string().contains("31/02/2025"));
    }

    #[test]
    fn test_missing_file() {
        let err = Gabarito::from_file("/nonexistent/gabarito.json", &LoadOptions::new()).unwrap_err();
        assert!(matches!(err, GabaritoError::Read { .. }));
    }
}

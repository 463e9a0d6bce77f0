// 🧾 Report Rendering - Text / JSON / CSV views of a reconciliation
// The text form is the copy-to-clipboard report: title, blank line, one line per outcome

use crate::outcome::Outcome;
use crate::reconciliation::ReconciliationReport;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// SUMMARY
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub ok: usize,
    pub errors: usize,

    /// Count per reason code; an outcome with two violations counts for both
    pub by_reason: BTreeMap<String, usize>,
}

impl ReportSummary {
    pub fn from_outcomes(outcomes: &[Outcome]) -> Self {
        let mut summary = ReportSummary {
            total: outcomes.len(),
            ..Default::default()
        };

        for outcome in outcomes {
            if outcome.is_ok() {
                summary.ok += 1;
                continue;
            }

            summary.errors += 1;
            for reason in outcome.reasons() {
                *summary.by_reason.entry(reason.code().to_string()).or_insert(0) += 1;
            }
        }

        summary
    }

    /// One-line human summary
    pub fn describe(&self) -> String {
        let mut line = format!("{} atividades: {} corretas, {} com erro", self.total, self.ok, self.errors);

        if !self.by_reason.is_empty() {
            let detail = self
                .by_reason
                .iter()
                .map(|(code, count)| format!("{}={}", code, count))
                .collect::<Vec<_>>()
                .join(", ");
            line.push_str(&format!(" ({})", detail));
        }

        line
    }
}

// ============================================================================
// GROUPING
// ============================================================================

/// Outcomes split by status, relative order preserved within each group
pub struct GroupedOutcomes<'a> {
    pub ok: Vec<&'a Outcome>,
    pub errors: Vec<&'a Outcome>,
}

impl ReconciliationReport {
    pub fn grouped(&self) -> GroupedOutcomes<'_> {
        let (ok, errors): (Vec<&Outcome>, Vec<&Outcome>) =
            self.outcomes.iter().partition(|o| o.is_ok());
        GroupedOutcomes { ok, errors }
    }
}

// ============================================================================
// RENDERING
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Clipboard-ready text, outcomes in processing order
    #[default]
    Text,
    /// Pretty-printed JSON of the full report
    Json,
    /// One CSV row per outcome
    Csv,
}

pub fn render(report: &ReconciliationReport, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(report)),
        ReportFormat::Json => render_json(report),
        ReportFormat::Csv => render_csv(report),
    }
}

pub fn render_text(report: &ReconciliationReport) -> String {
    let lines: Vec<String> = report.outcomes.iter().map(|o| o.to_string()).collect();
    format!("{}\n\n{}", report.title, lines.join("\n"))
}

pub fn render_json(report: &ReconciliationReport) -> Result<String> {
    #[derive(Serialize)]
    struct JsonReport<'a> {
        #[serde(flatten)]
        report: &'a ReconciliationReport,
        summary: ReportSummary,
    }

    serde_json::to_string_pretty(&JsonReport {
        report,
        summary: report.summary(),
    })
    .context("Failed to serialize report as JSON")
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    status: &'static str,
    entry: &'a str,
    input: &'a str,
    reasons: String,
    date: &'a str,
}

pub fn render_csv(report: &ReconciliationReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for outcome in &report.outcomes {
        let row = match outcome {
            Outcome::Ok { entry_name, date } => CsvRow {
                status: "ok",
                entry: entry_name,
                input: "",
                reasons: String::new(),
                date,
            },
            Outcome::Error {
                entry_name,
                input_name,
                reasons,
            } => CsvRow {
                status: "error",
                entry: entry_name.as_deref().unwrap_or_default(),
                input: input_name.as_deref().unwrap_or_default(),
                reasons: reasons.iter().map(|r| r.code()).collect::<Vec<_>>().join(";"),
                date: "",
            },
        };
        writer.serialize(row).context("Failed to write CSV row")?;
    }

    let bytes = writer.into_inner().context("Failed to flush CSV output")?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

// ============================================================================
// TESTS
// ============================================================================

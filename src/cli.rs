// CLI argument definitions

use clap::{Parser, ValueEnum};
use gabarito_check::logging::LogFormat;
use gabarito_check::ReportFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "gabarito-check",
    version,
    about = "Validate a chapter's activity checklist against the gabarito",
    long_about = "Validate a chapter's activity checklist against the gabarito.\n\n\
                  The checklist alternates lines: activity name, then its date (DD/MM/YYYY).\n\
                  Names are fuzzy-matched against the reference list; dates are checked\n\
                  against each activity's required month and deadline."
)]
pub struct Cli {
    /// Reference data (JSON with an `atividades` array)
    #[arg(long, short = 'g', value_name = "PATH")]
    pub gabarito: PathBuf,

    /// Chapter name used for the report title
    #[arg(long, short = 'c', value_name = "TEXT")]
    pub capitulo: String,

    /// Checklist file; reads stdin when absent or "-"
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Report format
    #[arg(long, short = 'f', value_enum, default_value = "text")]
    pub format: FormatArg,

    /// Minimum name similarity (0.0 - 1.0)
    #[arg(long, value_name = "SCORE", default_value_t = gabarito_check::SIMILARITY_THRESHOLD)]
    pub threshold: f64,

    /// Deadline for `validacao` entries without their own `prazo` (DD/MM/YYYY)
    #[arg(long, value_name = "DATE")]
    pub default_deadline: Option<String>,

    /// Ignore digits when comparing names
    #[arg(long)]
    pub strip_digits: bool,

    /// Prefix for chapter names that don't contain "capítulo"
    #[arg(long, value_name = "TEXT")]
    pub chapter_label: Option<String>,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(long, value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
    Csv,
}

impl From<FormatArg> for ReportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => ReportFormat::Text,
            FormatArg::Json => ReportFormat::Json,
            FormatArg::Csv => ReportFormat::Csv,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

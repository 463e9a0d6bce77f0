mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::Path;
use std::process::ExitCode;

use cli::Cli;
use gabarito_check::logging::{init_logging, LogConfig};
use gabarito_check::{
    parse_strict_date, render, Gabarito, LoadOptions, ReconciliationEngine, TextNormalizer,
};

/// Every activity is compliant
const EXIT_OK: u8 = 0;
/// The report contains at least one error outcome
const EXIT_REPORT_ERRORS: u8 = 1;
/// Bad arguments or input, reference data could not be loaded
const EXIT_FATAL: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_config = LogConfig::from_verbosity(cli.verbose, cli.quiet)
        .with_format(cli.log_format.into())
        .with_ansi(io::stderr().is_terminal());
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: {error:#}");
        return ExitCode::from(EXIT_FATAL);
    }

    let result = read_checklist(checklist_path(&cli)).and_then(|checklist| run(&cli, &checklist));

    match &result {
        Ok(output) => println!("{}", output.rendered),
        Err(error) => eprintln!("error: {error:#}"),
    }

    ExitCode::from(exit_status(&result))
}

/// Rendered report plus whether it was fully compliant
#[derive(Debug)]
struct RunOutput {
    rendered: String,
    compliant: bool,
}

fn exit_status(result: &Result<RunOutput>) -> u8 {
    match result {
        Ok(output) if output.compliant => EXIT_OK,
        Ok(_) => EXIT_REPORT_ERRORS,
        Err(_) => EXIT_FATAL,
    }
}

/// Validate arguments, load the gabarito and reconcile `checklist`.
fn run(cli: &Cli, checklist: &str) -> Result<RunOutput> {
    if cli.capitulo.trim().is_empty() {
        bail!("chapter name is empty");
    }
    if checklist.trim().is_empty() {
        bail!("checklist is empty");
    }
    if !(0.0..=1.0).contains(&cli.threshold) {
        bail!("threshold must be between 0.0 and 1.0, got {}", cli.threshold);
    }

    let normalizer = if cli.strip_digits {
        TextNormalizer::without_digits()
    } else {
        TextNormalizer::new()
    };

    // 1. Load reference data
    let options = load_options(cli, normalizer)?;
    let gabarito = Gabarito::from_file(&cli.gabarito, &options)
        .with_context(|| format!("Failed to load gabarito: {}", cli.gabarito.display()))?;

    // 2. Reconcile
    let mut engine = ReconciliationEngine::new()
        .with_threshold(cli.threshold)
        .with_normalizer(normalizer);
    if let Some(label) = &cli.chapter_label {
        engine = engine.with_chapter_label(label);
    }

    let report = engine.reconcile(gabarito.entries(), &cli.capitulo, checklist);
    tracing::info!("{}", report.summary().describe());

    // 3. Render
    Ok(RunOutput {
        rendered: render(&report, cli.format.into())?,
        compliant: report.is_compliant(),
    })
}

fn load_options(cli: &Cli, normalizer: TextNormalizer) -> Result<LoadOptions> {
    let mut options = LoadOptions::new().with_normalizer(normalizer);

    if let Some(text) = &cli.default_deadline {
        let deadline = parse_strict_date(text)
            .with_context(|| format!("invalid --default-deadline '{}' (expected DD/MM/YYYY)", text))?;
        options = options.with_default_deadline(deadline);
    }

    Ok(options)
}

/// Checklist file to read, `None` meaning stdin (no INPUT or "-")
fn checklist_path(cli: &Cli) -> Option<&Path> {
    cli.input
        .as_deref()
        .filter(|path| path.as_os_str() != "-")
}

fn read_checklist(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read checklist: {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read checklist from stdin")?;
            Ok(buffer)
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

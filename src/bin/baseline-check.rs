//! Check files on disk for web-platform features that are not Baseline.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use baseline_lsp::core::types::DiagnosticResult;
use baseline_lsp::diagnostics::provide_diagnostics_core;
use baseline_lsp::report::CheckSummary;
use baseline_lsp::{BaselineError, CompatTable, Detector, Domain};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::{debug, error, warn};
use tracing_subscriber::EnvFilter;

/// Report Baseline status of the CSS, HTML and JavaScript features used in files
#[derive(Parser, Debug)]
#[command(name = "baseline-check", version, about)]
struct Cli {
    /// Files to check
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Compatibility table (JSON) to use instead of the bundled one
    #[arg(long)]
    table: Option<PathBuf>,

    /// Language id for every file (css, html, javascript, typescript, ...)
    #[arg(short, long)]
    language: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct FileReport {
    path: String,
    summary: CheckSummary,
    diagnostics: Vec<DiagnosticResult>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(true) => ExitCode::from(1),
        Ok(false) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns whether any non-baseline feature was found.
fn run(cli: &Cli) -> Result<bool, BaselineError> {
    let table = match &cli.table {
        Some(path) => Arc::new(CompatTable::from_path(path)?),
        None => CompatTable::bundled(),
    };
    let detector = Detector::new(table);

    let mut reports = Vec::new();
    for path in &cli.files {
        let Some(domain) = domain_for(path, cli.language.as_deref()) else {
            warn!("Skipping {}: unsupported language", path.display());
            continue;
        };
        let text = std::fs::read_to_string(path)?;
        debug!("Checking {} as {}", path.display(), domain);

        reports.push(FileReport {
            path: path.display().to_string(),
            summary: detector.summarize(&text, domain),
            diagnostics: provide_diagnostics_core(&detector, &text, domain),
        });
    }

    match cli.format {
        Format::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        Format::Text => {
            for report in &reports {
                println!("{}: {}", report.path, report.summary.message());
                for diag in &report.diagnostics {
                    println!(
                        "  {}:{} warning [{}]: {}",
                        diag.range.start.line + 1,
                        diag.range.start.character + 1,
                        diag.feature_id,
                        diag.message
                    );
                }
            }
        }
    }

    Ok(reports
        .iter()
        .any(|report| report.summary.non_baseline_count > 0))
}

fn domain_for(path: &Path, language: Option<&str>) -> Option<Domain> {
    let language = match language {
        Some(language) => language,
        None => Domain::language_id_for_extension(path.extension()?.to_str()?)?,
    };
    Domain::classify(language)
}

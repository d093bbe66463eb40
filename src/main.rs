use std::path::PathBuf;
use std::time::Duration;

use baseline_lsp::config::{Config, DEFAULT_DEBOUNCE_MS};
use baseline_lsp::hover::DEFAULT_DOCS_BASE_URL;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Language server reporting Baseline status of web-platform features
#[derive(Parser, Debug)]
#[command(name = "baseline-lsp", version, about)]
struct Args {
    /// Compatibility table (JSON) to use instead of the bundled one
    #[arg(long)]
    table: Option<PathBuf>,

    /// Quiet period after an edit before the document is re-checked
    #[arg(long, default_value_t = DEFAULT_DEBOUNCE_MS)]
    debounce_ms: u64,

    /// Base URL that feature documentation paths are resolved against
    #[arg(long, default_value = DEFAULT_DOCS_BASE_URL)]
    docs_base_url: String,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config {
        debounce: Duration::from_millis(args.debounce_ms),
        table_path: args.table,
        docs_base_url: args.docs_base_url,
    };

    baseline_lsp::native::run(config).await;
}

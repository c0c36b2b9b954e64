//! Callsheet CLI: extract attributed analyst questions and prepared remarks.
//!
//! Usage:
//!   cargo run -p callsheet-cli -- --input transcripts/ [--out callsheet_out] [--symbol MSFT] [--config callsheet.toml]
//!
//! Reads transcript JSON (a file or a directory of files), runs attribution and
//! consolidation, and writes questions.json, prepared_statements.json, summary.md and
//! analysts/<First_Last_Institution>.json under the output directory.

use callsheet_cli::{filter_by_symbol, load_transcripts, print_usage, write_outputs, CliArgs};
use callsheet_core::{extract, ExtractionConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = CliArgs::parse_from(std::env::args().skip(1));
    let Some(input) = args.input.as_deref() else {
        print_usage();
        return Ok(());
    };

    let config = match &args.config_path {
        Some(p) => ExtractionConfig::load_from_path(p)?,
        None => ExtractionConfig::from_env(),
    };

    let transcripts = filter_by_symbol(load_transcripts(input)?, args.symbol.as_deref());
    info!("Callsheet: {} transcript(s) from {}", transcripts.len(), input.display());

    let output = extract(&transcripts, &config);
    let paths = write_outputs(&args.out_dir, &output, chrono::Local::now())?;

    info!("Callsheet: digest written to {}", paths.digest.display());
    Ok(())
}

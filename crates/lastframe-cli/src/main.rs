mod progress;
mod summary;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use lastframe_core::extract::config::ExtractConfig;
use lastframe_core::extract::{extract_last_frame_reported, Extraction};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use progress::SpinnerReporter;

#[derive(Parser)]
#[command(name = "lastframe", about = "Save the last frame of an animated GIF as a PNG")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Input image [default: <program dir>/public/landing_cat.gif]
    input: Option<PathBuf>,

    /// Output PNG [default: <program dir>/public/landing_cat_static.png]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let outcome = run(&cli);
    match &outcome {
        Ok(extraction) => summary::print_extraction(extraction),
        Err(err) => summary::print_error(err),
    }
    println!("Done!");

    if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run(cli: &Cli) -> Result<Extraction> {
    let config = resolve_config(cli)?;
    debug!(
        input = %config.input.display(),
        output = %config.output.display(),
        "Resolved paths"
    );

    let reporter = SpinnerReporter::new()?;
    let result = extract_last_frame_reported(&config, &reporter)
        .with_context(|| format!("Failed to extract last frame of {}", config.input.display()));
    reporter.clear();
    result
}

/// Explicit paths win; missing ones fall back to the layout beside the
/// executable.
fn resolve_config(cli: &Cli) -> Result<ExtractConfig> {
    if let (Some(input), Some(output)) = (&cli.input, &cli.output) {
        return Ok(ExtractConfig::new(input, output));
    }
    let defaults = ExtractConfig::beside(&program_dir()?);
    Ok(ExtractConfig {
        input: cli.input.clone().unwrap_or(defaults.input),
        output: cli.output.clone().unwrap_or(defaults.output),
    })
}

fn program_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    exe.parent()
        .map(Path::to_path_buf)
        .context("Executable has no parent directory")
}

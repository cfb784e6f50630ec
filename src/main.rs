//! corpus-stats - Parallel Article Corpus Statistics
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use corpus_stats::config::{CliArgs, RunConfig};
use corpus_stats::pipeline::PipelineCoordinator;
use corpus_stats::progress::{print_header, print_summary, ProgressReporter};
use corpus_stats::report::ReportBuilder;
use corpus_stats::roster::{self, AuxiliaryLists};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Setup logging
    setup_logging(args.verbose)?;

    // Validate and create config
    let config = RunConfig::from_args(args).context("Invalid configuration")?;

    // Print header
    if config.show_progress {
        print_header(
            &config.article_roster.display().to_string(),
            config.worker_count,
            &config.output_dir.display().to_string(),
        );
    }

    // Rosters are fatal when malformed - nothing sensible can run
    // over a partial manifest
    let article_files =
        roster::read_roster(&config.article_roster).context("Invalid article roster")?;
    let aux = AuxiliaryLists::load(&config.auxiliary_roster)
        .context("Invalid auxiliary roster")?;

    // Create progress reporter
    let progress = if config.show_progress {
        Some(ProgressReporter::new())
    } else {
        None
    };

    if let Some(ref p) = progress {
        p.set_status("Ingesting and aggregating articles...");
    }

    // Run the pipeline
    let coordinator = PipelineCoordinator::new(config.clone());
    let (statistics, result) = coordinator
        .run(article_files, aux.stop_words)
        .context("Pipeline failed")?;

    if let Some(ref p) = progress {
        p.set_status("Writing reports...");
    }

    // Write the report listings
    let builder = ReportBuilder::new(&config.output_dir, aux.languages, aux.categories)
        .context("Failed to prepare output directory")?;
    builder
        .write_all(&statistics)
        .context("Failed to write reports")?;

    // Finish progress
    if let Some(ref p) = progress {
        p.finish("Run completed");
    }

    // Print summary
    if config.show_progress {
        print_summary(&result, &config.output_dir.display().to_string());
    }

    Ok(())
}

fn setup_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("corpus_stats=debug,warn")
    } else {
        EnvFilter::new("corpus_stats=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}

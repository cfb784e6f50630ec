//! Configuration types for corpus-stats
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation

use crate::error::ConfigError;
use clap::Parser;
use std::path::PathBuf;

/// Maximum reasonable worker count
const MAX_WORKERS: usize = 512;

/// Article corpus statistics over rostered JSON files
#[derive(Parser, Debug, Clone)]
#[command(
    name = "corpus-stats",
    version,
    about = "Deduplicate a rostered article corpus and report ranked statistics",
    long_about = "Ingests every article file named by the roster in parallel, filters \
                  duplicates corpus-wide (an article is a duplicate when its uuid or title \
                  occurs more than once), extracts keywords from unique English articles, \
                  and writes the report listings.",
    after_help = "EXAMPLES:\n    \
        corpus-stats articles.txt inputs.txt\n    \
        corpus-stats articles.txt inputs.txt -w 8 -o reports/\n    \
        corpus-stats articles.txt inputs.txt -q"
)]
pub struct CliArgs {
    /// Article roster (count + relative paths to article JSON files)
    #[arg(value_name = "ARTICLE_ROSTER")]
    pub article_roster: PathBuf,

    /// Auxiliary roster (count + paths: languages, categories, linking words)
    #[arg(value_name = "AUX_ROSTER")]
    pub auxiliary_roster: PathBuf,

    /// Number of worker threads for both parallel phases
    #[arg(
        short = 'w',
        long,
        default_value_t = default_workers(),
        value_name = "NUM"
    )]
    pub workers: usize,

    /// Directory the report files are written to
    #[arg(short = 'o', long, default_value = ".", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Quiet mode - suppress progress output
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose output (per-file ingest logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

fn default_workers() -> usize {
    // Parsing and tokenization are CPU bound
    num_cpus::get()
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Article roster path
    pub article_roster: PathBuf,

    /// Auxiliary roster path
    pub auxiliary_roster: PathBuf,

    /// Worker count for both parallel phases
    pub worker_count: usize,

    /// Report output directory
    pub output_dir: PathBuf,

    /// Whether to display the progress spinner and summary
    pub show_progress: bool,

    /// Verbose logging requested
    pub verbose: bool,
}

impl RunConfig {
    /// Validate CLI arguments into a runtime configuration
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        if args.workers == 0 || args.workers > MAX_WORKERS {
            return Err(ConfigError::InvalidWorkerCount {
                count: args.workers,
                max: MAX_WORKERS,
            });
        }

        for roster in [&args.article_roster, &args.auxiliary_roster] {
            if !roster.is_file() {
                return Err(ConfigError::RosterNotFound {
                    path: roster.clone(),
                });
            }
        }

        Ok(Self {
            article_roster: args.article_roster,
            auxiliary_roster: args.auxiliary_roster,
            worker_count: args.workers,
            output_dir: args.output_dir,
            show_progress: !args.quiet,
            verbose: args.verbose,
        })
    }
}

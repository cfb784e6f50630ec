//! Progress reporting for the aggregation pipeline
//!
//! Provides a live status spinner using indicatif plus the styled
//! header and summary blocks printed around a run.

use crate::pipeline::RunResult;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner that displays the current pipeline phase
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();

        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .expect("Invalid progress template")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Set a status message
    pub fn set_status(&self, status: &str) {
        self.bar.set_message(status.to_string());
    }

    /// Finish the progress display with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousands separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let bytes: Vec<_> = s.bytes().rev().collect();

    let chunks: Vec<String> = bytes
        .chunks(3)
        .map(|chunk| chunk.iter().rev().map(|&b| b as char).collect::<String>())
        .collect();

    chunks.into_iter().rev().collect::<Vec<_>>().join(",")
}

/// Print a summary of the run results
pub fn print_summary(result: &RunResult, output_dir: &str) {
    let duration_secs = result.duration.as_secs_f64();

    println!();
    println!("{}", style("Run Complete").green().bold());
    println!("{}", style("─".repeat(50)).dim());
    println!(
        "  {} {}",
        style("Files parsed:").bold(),
        format_number(result.files_parsed)
    );
    if result.files_failed > 0 {
        println!(
            "  {} {}",
            style("Files skipped:").yellow().bold(),
            format_number(result.files_failed)
        );
    }
    println!(
        "  {} {}",
        style("Articles:").bold(),
        format_number(result.corpus_len as u64)
    );
    println!(
        "  {} {}",
        style("Duplicates:").bold(),
        format_number(result.duplicates_found as u64)
    );
    println!(
        "  {} {}",
        style("Unique:").bold(),
        format_number(result.unique_articles as u64)
    );
    println!(
        "  {} {}",
        style("Keywords:").bold(),
        format_number(result.keywords as u64)
    );
    println!("  {} {:.1}s", style("Duration:").bold(), duration_secs);
    println!("  {} {}", style("Reports:").bold(), output_dir);
    println!();
}

/// Print a header at the start of the run
pub fn print_header(article_roster: &str, workers: usize, output_dir: &str) {
    println!();
    println!(
        "{} {}",
        style("corpus-stats").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{}", style("─".repeat(50)).dim());
    println!("  {} {}", style("Roster:").bold(), article_roster);
    println!("  {} {}", style("Workers:").bold(), workers);
    println!("  {} {}", style("Output:").bold(), output_dir);
    println!();
}

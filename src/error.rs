//! Error types for corpus-stats
//!
//! This module defines a comprehensive error hierarchy that covers:
//! - Roster file parsing errors (fatal)
//! - Per-file article ingestion errors (recovered)
//! - Configuration and CLI errors
//! - Worker thread errors
//! - Report output errors
//!
//! Design philosophy:
//! - Use thiserror for structured error types in library code
//! - Errors should be actionable - include context about what to do
//! - A malformed article file is not an error for the run, only for that file

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the corpus-stats application
#[derive(Error, Debug)]
pub enum StatsError {
    /// Roster file errors (malformed manifests are fatal)
    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Worker/concurrency errors
    #[error("Worker error: {0}")]
    Worker(#[from] WorkerError),

    /// Report output errors
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Roster manifest errors
///
/// A roster is a count line followed by that many relative paths. Any
/// deviation aborts the run - there is no sensible partial roster.
#[derive(Error, Debug)]
pub enum RosterError {
    /// Failed to open or read the roster file
    #[error("Failed to read roster '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Roster is empty (no count line)
    #[error("Roster '{path}' is empty - expected a count line")]
    MissingCount { path: PathBuf },

    /// Count line is not an integer
    #[error("Roster '{path}' has invalid count line '{line}'")]
    InvalidCount { path: PathBuf, line: String },

    /// Fewer entries than the count line promised
    #[error("Roster '{path}' lists {expected} entries but only {found} lines follow")]
    Truncated {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    /// Auxiliary roster must name the language, category and linking-word lists
    #[error("Auxiliary roster '{path}' names {found} files, need at least 3 \
             (languages, categories, linking words)")]
    AuxiliaryIncomplete { path: PathBuf, found: usize },
}

/// Per-file article ingestion errors
///
/// These are recovered: the file contributes zero articles and the
/// run continues with the remaining files.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Failed to read the article file
    #[error("Failed to read article file '{path}': {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    /// File content is not a JSON array of article records
    #[error("Failed to parse article file '{path}': {reason}")]
    ParseFailed { path: PathBuf, reason: String },
}

/// Configuration and CLI errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid worker count
    #[error("Invalid worker count {count}: must be between 1 and {max}")]
    InvalidWorkerCount { count: usize, max: usize },

    /// Roster path does not exist
    #[error("Roster file not found: '{path}'")]
    RosterNotFound { path: PathBuf },

    /// Output directory error
    #[error("Invalid output directory '{path}': {reason}")]
    InvalidOutputDir { path: PathBuf, reason: String },
}

/// Worker thread errors
#[derive(Error, Debug)]
pub enum WorkerError {
    /// Worker panicked
    #[error("Worker {id} panicked: {message}")]
    Panicked { id: usize, message: String },

    /// Worker initialization failed
    #[error("Failed to initialize worker {id}: {reason}")]
    InitFailed { id: usize, reason: String },

    /// Shared corpus still has outstanding writers after the join barrier
    #[error("Corpus still shared after ingestion joined - a worker leaked its handle")]
    CorpusStillShared,

    /// Shared keyword index still has outstanding references after the pool joined
    #[error("Keyword index still shared after extraction joined - a worker leaked its handle")]
    IndexStillShared,
}

/// Report output errors
#[derive(Error, Debug)]
pub enum ReportError {
    /// Failed to create the output directory
    #[error("Failed to create output directory '{path}': {reason}")]
    CreateDirFailed { path: PathBuf, reason: String },

    /// Failed to write a report file
    #[error("Failed to write report '{path}': {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type alias for StatsError
pub type Result<T> = std::result::Result<T, StatsError>;

/// Result type alias for RosterError
pub type RosterResult<T> = std::result::Result<T, RosterError>;

/// Result type alias for IngestError
pub type IngestResult<T> = std::result::Result<T, IngestError>;

/// Represents the outcome of ingesting a single article file
#[derive(Debug)]
pub enum IngestOutcome {
    /// File parsed; its articles were appended to the corpus
    Parsed { path: PathBuf, articles: usize },

    /// File was unreadable or malformed and contributed nothing
    Failed { path: PathBuf, error: IngestError },
}

impl IngestOutcome {
    /// Returns true if this outcome represents success
    pub fn is_parsed(&self) -> bool {
        matches!(self, IngestOutcome::Parsed { .. })
    }

    /// Returns the path associated with this outcome
    pub fn path(&self) -> &std::path::Path {
        match self {
            IngestOutcome::Parsed { path, .. } => path,
            IngestOutcome::Failed { path, .. } => path,
        }
    }
}

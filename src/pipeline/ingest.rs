//! Ingestion worker pool
//!
//! Each worker:
//! - Pulls an article-file path from the work queue
//! - Reads and parses the file as a JSON array of article records
//! - Appends the whole file's articles to the corpus in one batch
//!
//! A file that cannot be read or parsed is logged and contributes zero
//! articles; the other workers are unaffected. Workers terminate when
//! the queue is drained, and the pool's join is the barrier the rest of
//! the pipeline relies on: nothing may read the corpus before it.

use crate::article::Article;
use crate::corpus::CorpusWriter;
use crate::error::{IngestError, IngestOutcome, IngestResult, WorkerError};
use crate::pipeline::queue::WorkQueueHandle;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, info, trace, warn};

/// Statistics collected by an ingestion worker
#[derive(Debug, Default)]
pub struct IngestStats {
    /// Files successfully parsed
    pub files_parsed: AtomicU64,

    /// Files that failed to read or parse
    pub files_failed: AtomicU64,

    /// Articles appended to the corpus
    pub articles_ingested: AtomicU64,
}

impl IngestStats {
    fn record_parsed(&self, articles: u64) {
        self.files_parsed.fetch_add(1, Ordering::Relaxed);
        self.articles_ingested.fetch_add(articles, Ordering::Relaxed);
    }

    fn record_failed(&self) {
        self.files_failed.fetch_add(1, Ordering::Relaxed);
    }
}

/// Totals across the whole ingestion pool
#[derive(Debug, Default, Clone, Copy)]
pub struct IngestTotals {
    /// Files successfully parsed
    pub files_parsed: u64,

    /// Files that contributed zero articles due to errors
    pub files_failed: u64,

    /// Articles appended to the corpus
    pub articles_ingested: u64,
}

/// A worker thread that ingests article files
pub struct IngestWorker {
    /// Worker ID
    id: usize,

    /// Thread handle
    handle: Option<JoinHandle<()>>,

    /// Worker statistics
    stats: Arc<IngestStats>,
}

impl IngestWorker {
    /// Spawn a new ingestion worker
    pub fn spawn(
        id: usize,
        queue: WorkQueueHandle<PathBuf>,
        corpus: CorpusWriter,
    ) -> Result<Self, WorkerError> {
        let stats = Arc::new(IngestStats::default());
        let stats_clone = Arc::clone(&stats);

        let handle = thread::Builder::new()
            .name(format!("ingest-{}", id))
            .spawn(move || worker_loop(id, queue, corpus, stats_clone))
            .map_err(|e| WorkerError::InitFailed {
                id,
                reason: e.to_string(),
            })?;

        Ok(Self {
            id,
            handle: Some(handle),
            stats,
        })
    }

    /// Get worker ID
    pub fn id(&self) -> usize {
        self.id
    }

    /// Get worker statistics
    pub fn stats(&self) -> &IngestStats {
        &self.stats
    }

    /// Wait for the worker to finish draining the queue
    ///
    /// Returns the worker's final statistics; the join is the only
    /// point where reading them is race-free.
    pub fn join(mut self) -> Result<Arc<IngestStats>, WorkerError> {
        if let Some(handle) = self.handle.take() {
            handle.join().map_err(|_| WorkerError::Panicked {
                id: self.id,
                message: "Ingestion worker thread panicked".into(),
            })?;
        }
        Ok(self.stats)
    }
}

/// Main worker loop: drain the path queue until empty
fn worker_loop(
    id: usize,
    queue: WorkQueueHandle<PathBuf>,
    corpus: CorpusWriter,
    stats: Arc<IngestStats>,
) {
    debug!(worker = id, "Ingestion worker starting");

    while let Some(path) = queue.pop() {
        let outcome = process_file(path, &corpus, &stats);

        match &outcome {
            IngestOutcome::Parsed { path, articles } => {
                trace!(worker = id, path = %path.display(), articles, "File ingested");
            }
            IngestOutcome::Failed { path, error } => {
                warn!(worker = id, path = %path.display(), error = %error, "File skipped");
            }
        }
    }

    info!(
        worker = id,
        files = stats.files_parsed.load(Ordering::Relaxed),
        articles = stats.articles_ingested.load(Ordering::Relaxed),
        failed = stats.files_failed.load(Ordering::Relaxed),
        "Ingestion worker finished"
    );
}

/// Ingest a single article file
fn process_file(path: PathBuf, corpus: &CorpusWriter, stats: &IngestStats) -> IngestOutcome {
    match parse_article_file(&path) {
        Ok(articles) => {
            let count = articles.len();
            stats.record_parsed(count as u64);
            corpus.append_batch(articles);
            IngestOutcome::Parsed {
                path,
                articles: count,
            }
        }
        Err(error) => {
            stats.record_failed();
            IngestOutcome::Failed { path, error }
        }
    }
}

/// Parse one file into its article records
pub fn parse_article_file(path: &Path) -> IngestResult<Vec<Article>> {
    let content = std::fs::read_to_string(path).map_err(|e| IngestError::ReadFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    serde_json::from_str(&content).map_err(|e| IngestError::ParseFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Fold one worker's final statistics into the pool totals
pub fn fold_totals(totals: &mut IngestTotals, stats: &IngestStats) {
    totals.files_parsed += stats.files_parsed.load(Ordering::Relaxed);
    totals.files_failed += stats.files_failed.load(Ordering::Relaxed);
    totals.articles_ingested += stats.articles_ingested.load(Ordering::Relaxed);
}

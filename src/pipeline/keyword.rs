//! Keyword extraction worker pool
//!
//! The second parallel phase. Workers drain a queue of unique English
//! articles and record, for every keyword, the set of articles it
//! appears in. Insertions into the shared index are idempotent and
//! commutative, so worker scheduling cannot affect the final map.
//!
//! Tokenization: lowercase the text, split on whitespace, strip every
//! character that is not a lowercase letter from each token, drop empty
//! tokens and linking words, and collapse repeats within the article.

use crate::article::Article;
use crate::error::WorkerError;
use crate::pipeline::queue::WorkQueueHandle;
use dashmap::DashMap;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, info};

/// Concurrent keyword -> article-uuid-set index
///
/// Grows monotonically during extraction and never shrinks. Each
/// insertion locks only the touched keyword's shard, and re-adding an
/// existing uuid is a no-op.
#[derive(Debug, Default)]
pub struct KeywordIndex {
    map: DashMap<String, HashSet<String>>,
}

impl KeywordIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an article contains a keyword
    pub fn insert(&self, keyword: String, uuid: &str) {
        self.map.entry(keyword).or_default().insert(uuid.to_string());
    }

    /// Number of distinct keywords
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True if no keywords have been recorded
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Freeze the index into a plain map once extraction has joined
    pub fn into_map(self) -> HashMap<String, HashSet<String>> {
        self.map.into_iter().collect()
    }
}

/// Split an article text into its keyword set
///
/// A keyword is counted once per article no matter how often it repeats
/// in the text.
pub fn extract_keywords(text: &str, stop_words: &HashSet<String>) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|token| {
            token
                .chars()
                .filter(|c| c.is_ascii_lowercase())
                .collect::<String>()
        })
        .filter(|token| !token.is_empty() && !stop_words.contains(token))
        .collect()
}

/// Statistics collected by a keyword worker
#[derive(Debug, Default)]
pub struct KeywordStats {
    /// Articles whose text was tokenized
    pub articles_processed: AtomicU64,

    /// Articles skipped because they carry no text
    pub articles_skipped: AtomicU64,

    /// Keyword occurrences recorded (one per article per keyword)
    pub keywords_recorded: AtomicU64,
}

/// A worker thread that extracts keywords from unique English articles
pub struct KeywordWorker {
    /// Worker ID
    id: usize,

    /// Thread handle
    handle: Option<JoinHandle<()>>,

    /// Worker statistics
    stats: Arc<KeywordStats>,
}

impl KeywordWorker {
    /// Spawn a new keyword worker
    pub fn spawn(
        id: usize,
        queue: WorkQueueHandle<Article>,
        index: Arc<KeywordIndex>,
        stop_words: Arc<HashSet<String>>,
    ) -> Result<Self, WorkerError> {
        let stats = Arc::new(KeywordStats::default());
        let stats_clone = Arc::clone(&stats);

        let handle = thread::Builder::new()
            .name(format!("keyword-{}", id))
            .spawn(move || worker_loop(id, queue, index, stop_words, stats_clone))
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
    pub fn stats(&self) -> &KeywordStats {
        &self.stats
    }

    /// Wait for the worker to finish draining the queue
    ///
    /// Returns the worker's final statistics; the join is the only
    /// point where reading them is race-free.
    pub fn join(mut self) -> Result<Arc<KeywordStats>, WorkerError> {
        if let Some(handle) = self.handle.take() {
            handle.join().map_err(|_| WorkerError::Panicked {
                id: self.id,
                message: "Keyword worker thread panicked".into(),
            })?;
        }
        Ok(self.stats)
    }
}

/// Main worker loop: drain the article queue until empty
fn worker_loop(
    id: usize,
    queue: WorkQueueHandle<Article>,
    index: Arc<KeywordIndex>,
    stop_words: Arc<HashSet<String>>,
    stats: Arc<KeywordStats>,
) {
    debug!(worker = id, "Keyword worker starting");

    while let Some(article) = queue.pop() {
        // Articles without text are skipped, not errors
        let Some(text) = article.text.as_deref() else {
            stats.articles_skipped.fetch_add(1, Ordering::Relaxed);
            continue;
        };

        let keywords = extract_keywords(text, &stop_words);
        stats
            .keywords_recorded
            .fetch_add(keywords.len() as u64, Ordering::Relaxed);

        for keyword in keywords {
            index.insert(keyword, &article.uuid);
        }

        stats.articles_processed.fetch_add(1, Ordering::Relaxed);
    }

    info!(
        worker = id,
        articles = stats.articles_processed.load(Ordering::Relaxed),
        skipped = stats.articles_skipped.load(Ordering::Relaxed),
        "Keyword worker finished"
    );
}

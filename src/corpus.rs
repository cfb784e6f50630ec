//! Shared article corpus for the ingestion phase
//!
//! The corpus is append-only while ingestion workers run and frozen
//! afterwards. Workers never hold the corpus itself - they hold a
//! clone-able [`CorpusWriter`] handle that batches one append per file,
//! so there is one critical section per file rather than per article.
//! After the ingestion pool joins, [`Corpus::into_articles`] reclaims
//! exclusive ownership and the concurrency concerns end there.

use crate::article::Article;
use crate::error::WorkerError;
use std::sync::{Arc, Mutex};

/// Append-only store of all raw articles across all ingested files
///
/// Insertion order is arrival order from whichever worker finished a
/// file first. That order is not deterministic across runs, which is
/// fine: nothing downstream depends on it beyond being a stable
/// sequence for the single-threaded aggregation pass.
pub struct Corpus {
    articles: Arc<Mutex<Vec<Article>>>,
}

impl Corpus {
    /// Create an empty corpus
    pub fn new() -> Self {
        Self {
            articles: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a writer handle for an ingestion worker
    pub fn writer(&self) -> CorpusWriter {
        CorpusWriter {
            articles: Arc::clone(&self.articles),
        }
    }

    /// Number of articles appended so far
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True if no articles have been appended
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Reclaim exclusive ownership of the articles
    ///
    /// Callers must only invoke this after every worker holding a
    /// [`CorpusWriter`] has been joined; outstanding handles are an
    /// error, not a wait condition.
    pub fn into_articles(self) -> Result<Vec<Article>, WorkerError> {
        match Arc::try_unwrap(self.articles) {
            Ok(mutex) => Ok(mutex.into_inner().unwrap_or_else(|e| e.into_inner())),
            Err(_) => Err(WorkerError::CorpusStillShared),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Article>> {
        self.articles.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for Corpus {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for appending parsed articles to the corpus
#[derive(Clone)]
pub struct CorpusWriter {
    articles: Arc<Mutex<Vec<Article>>>,
}

impl CorpusWriter {
    /// Append all articles from one parsed file in a single critical section
    pub fn append_batch(&self, batch: Vec<Article>) {
        if batch.is_empty() {
            return;
        }
        let mut articles = self.articles.lock().unwrap_or_else(|e| e.into_inner());
        articles.extend(batch);
    }
}

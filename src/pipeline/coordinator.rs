//! Pipeline coordinator - orchestrates the two-phase aggregation
//!
//! The coordinator is responsible for:
//! - Seeding the path queue and running the ingestion pool (phase 1)
//! - Enforcing the join barrier before any corpus read
//! - Running the single-threaded duplicate filter and tallies (phase 2)
//! - Seeding the article queue and running the keyword pool (phase 3)
//! - Final statistics and run totals
//!
//! The phase ordering is the core correctness property: duplicate
//! status depends on global frequencies, so phase 2 must see the whole
//! corpus, and phase 3 must only see articles that survived phase 2.
//! The two parallel phases never overlap.

use crate::article::Article;
use crate::config::RunConfig;
use crate::corpus::Corpus;
use crate::error::{Result, WorkerError};
use crate::pipeline::ingest::{fold_totals, IngestTotals, IngestWorker};
use crate::pipeline::keyword::{KeywordIndex, KeywordWorker};
use crate::pipeline::queue::WorkQueue;
use crate::stats::Statistics;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Result of a completed pipeline run
#[derive(Debug)]
pub struct RunResult {
    /// Files named by the roster
    pub files_listed: usize,

    /// Files successfully parsed
    pub files_parsed: u64,

    /// Files that contributed zero articles due to errors
    pub files_failed: u64,

    /// Articles across all parsed files, duplicates included
    pub corpus_len: usize,

    /// Articles rejected by the duplicate filter
    pub duplicates_found: usize,

    /// Articles that survived the duplicate filter
    pub unique_articles: usize,

    /// Unique English articles handed to keyword extraction
    pub english_articles: usize,

    /// Distinct keywords recorded
    pub keywords: usize,

    /// Time taken for the whole pipeline
    pub duration: Duration,
}

/// Coordinates the two-phase aggregation pipeline
pub struct PipelineCoordinator {
    /// Configuration
    config: Arc<RunConfig>,
}

impl PipelineCoordinator {
    /// Create a new coordinator
    pub fn new(config: RunConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Run the pipeline over the rostered article files
    ///
    /// Returns the final statistics and the run totals. `stop_words`
    /// is the externally supplied linking-word set for phase 3.
    pub fn run(
        &self,
        article_files: Vec<PathBuf>,
        stop_words: HashSet<String>,
    ) -> Result<(Statistics, RunResult)> {
        let start_time = Instant::now();
        let start_datetime: DateTime<Utc> = Utc::now();

        let files_listed = article_files.len();
        info!(
            files = files_listed,
            workers = self.config.worker_count,
            started = %start_datetime.to_rfc3339(),
            "Starting aggregation pipeline"
        );

        // Phase 1: parallel ingestion into the shared corpus
        let (corpus, ingest_totals) = self.run_ingestion(article_files)?;
        let corpus_len = corpus.len();

        // The ingestion pool has joined: the corpus is frozen and owned
        // exclusively from here on.
        let articles = corpus.into_articles()?;

        // Phase 2: single-threaded duplicate filter and tallies
        let mut statistics = Statistics::aggregate(articles);
        info!(
            corpus = corpus_len,
            duplicates = statistics.duplicates_found(),
            unique = statistics.unique_count(),
            "Aggregation complete"
        );

        // Phase 3: parallel keyword extraction over unique English articles
        let english: Vec<Article> = statistics
            .unique_articles()
            .iter()
            .filter(|a| a.is_english())
            .cloned()
            .collect();
        let english_articles = english.len();

        let keyword_map = self.run_keyword_extraction(english, stop_words)?;
        let keywords = keyword_map.len();
        statistics.attach_keywords(keyword_map);

        let duration = start_time.elapsed();
        info!(
            unique = statistics.unique_count(),
            keywords,
            duration_ms = duration.as_millis() as u64,
            "Pipeline completed"
        );

        let result = RunResult {
            files_listed,
            files_parsed: ingest_totals.files_parsed,
            files_failed: ingest_totals.files_failed,
            corpus_len,
            duplicates_found: statistics.duplicates_found(),
            unique_articles: statistics.unique_count(),
            english_articles,
            keywords,
            duration,
        };

        Ok((statistics, result))
    }

    /// Phase 1: spawn the ingestion pool and wait for it to drain the queue
    fn run_ingestion(&self, article_files: Vec<PathBuf>) -> Result<(Corpus, IngestTotals)> {
        let queue = WorkQueue::seeded(article_files);
        let corpus = Corpus::new();

        let mut workers = Vec::with_capacity(self.config.worker_count);
        for id in 0..self.config.worker_count {
            workers.push(IngestWorker::spawn(id, queue.handle(), corpus.writer())?);
        }
        debug!(count = workers.len(), "Ingestion workers spawned");

        let totals = Self::join_ingest_workers(workers)?;

        info!(
            files = totals.files_parsed,
            failed = totals.files_failed,
            articles = totals.articles_ingested,
            "Ingestion joined"
        );

        Ok((corpus, totals))
    }

    /// Phase 3: spawn the keyword pool and wait for it to drain the queue
    fn run_keyword_extraction(
        &self,
        english: Vec<Article>,
        stop_words: HashSet<String>,
    ) -> Result<std::collections::HashMap<String, HashSet<String>>> {
        let queue = WorkQueue::seeded(english);
        let index = Arc::new(KeywordIndex::new());
        let stop_words = Arc::new(stop_words);

        let mut workers = Vec::with_capacity(self.config.worker_count);
        for id in 0..self.config.worker_count {
            workers.push(KeywordWorker::spawn(
                id,
                queue.handle(),
                Arc::clone(&index),
                Arc::clone(&stop_words),
            )?);
        }
        debug!(count = workers.len(), "Keyword workers spawned");

        for worker in workers {
            if let Err(e) = worker.join() {
                warn!(error = %e, "Keyword worker failed to join cleanly");
            }
        }

        // All workers joined; reclaim the index
        let index = Arc::try_unwrap(index).map_err(|_| WorkerError::IndexStillShared)?;
        Ok(index.into_map())
    }

    /// Join all ingestion workers and collect final stats
    fn join_ingest_workers(workers: Vec<IngestWorker>) -> Result<IngestTotals> {
        let mut totals = IngestTotals::default();

        for worker in workers {
            match worker.join() {
                Ok(stats) => fold_totals(&mut totals, &stats),
                Err(e) => warn!(error = %e, "Ingestion worker failed to join cleanly"),
            }
        }

        Ok(totals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use std::fs::File;
    use std::io::Write;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    fn config(workers: usize) -> RunConfig {
        RunConfig {
            article_roster: PathBuf::from("unused"),
            auxiliary_roster: PathBuf::from("unused"),
            worker_count: workers,
            output_dir: PathBuf::from("."),
            show_progress: false,
            verbose: false,
        }
    }

    #[test]
    fn test_full_pipeline_over_files() {
        let dir = tempdir().unwrap();
        let a = write_file(
            dir.path(),
            "a.json",
            r#"[
                {"uuid": "u1", "title": "T1", "author": "Alice", "language": "english",
                 "published": "2024-01-05", "text": "the quick fox", "url": "http://x/1"},
                {"uuid": "u2", "title": "T2", "author": "Bob", "language": "german",
                 "published": "2024-01-06", "url": "http://x/2"}
            ]"#,
        );
        let b = write_file(
            dir.path(),
            "b.json",
            r#"[
                {"uuid": "u1", "title": "T1-copy", "author": "Alice", "language": "english",
                 "published": "2024-01-01", "url": "http://x/3"}
            ]"#,
        );

        let coordinator = PipelineCoordinator::new(config(4));
        let stop_words: HashSet<String> = ["the".to_string()].into_iter().collect();
        let (stats, result) = coordinator.run(vec![a, b], stop_words).unwrap();

        // u1 appears twice -> both copies rejected; u2 survives
        assert_eq!(result.corpus_len, 3);
        assert_eq!(result.duplicates_found, 2);
        assert_eq!(result.unique_articles, 1);
        assert_eq!(
            result.duplicates_found + result.unique_articles,
            result.corpus_len
        );

        // The survivor is German, so no keyword work happened
        assert_eq!(result.english_articles, 0);
        assert_eq!(result.keywords, 0);
        assert_eq!(stats.unique_articles()[0].uuid, "u2");
    }

    #[test]
    fn test_pipeline_extracts_keywords_from_unique_english() {
        let dir = tempdir().unwrap();
        let a = write_file(
            dir.path(),
            "a.json",
            r#"[
                {"uuid": "u1", "title": "T1", "language": "english",
                 "published": "2024-01-05", "text": "The Quick Fox jumps; the Fox runs."}
            ]"#,
        );

        let coordinator = PipelineCoordinator::new(config(2));
        let stop_words: HashSet<String> = ["the".to_string()].into_iter().collect();
        let (stats, result) = coordinator.run(vec![a], stop_words).unwrap();

        assert_eq!(result.keywords, 4);
        let keywords = stats.keyword_articles();
        for expected in ["quick", "fox", "jumps", "runs"] {
            assert!(keywords.contains_key(expected), "missing {expected}");
            assert_eq!(keywords[expected].len(), 1);
        }
        assert_eq!(stats.top_keyword_english().map(|(_, n)| n), Some(1));
    }

    #[test]
    fn test_pipeline_survives_unreadable_files() {
        let dir = tempdir().unwrap();
        let good = write_file(dir.path(), "good.json", r#"[{"uuid": "u1", "title": "T"}]"#);
        let missing = dir.path().join("missing.json");

        let coordinator = PipelineCoordinator::new(config(2));
        let (_, result) = coordinator.run(vec![good, missing], HashSet::new()).unwrap();

        assert_eq!(result.files_parsed, 1);
        assert_eq!(result.files_failed, 1);
        assert_eq!(result.corpus_len, 1);
    }
}

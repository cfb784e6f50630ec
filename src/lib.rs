//! corpus-stats - Parallel Article Corpus Statistics
//!
//! Ingests a corpus of article records spread across many JSON files,
//! removes duplicates using corpus-wide uniqueness rules, computes
//! ranked aggregate statistics (authors, languages, categories,
//! keywords), and writes deterministic report listings.
//!
//! # Features
//!
//! - **Parallel Ingestion**: a fixed pool of worker threads drains a
//!   FIFO of file paths, parsing each file and appending its articles
//!   to a shared corpus one batch per file.
//!
//! - **Corpus-Wide Deduplication**: duplicate status depends on global
//!   uuid/title frequencies, so it is decided in a single-threaded pass
//!   after a hard join barrier - never incrementally during ingestion.
//!
//! - **Parallel Keyword Extraction**: a second pool tokenizes unique
//!   English articles into a concurrent keyword index whose insertions
//!   are idempotent and commutative.
//!
//! - **Deterministic Reports**: every accessor and listing is a pure
//!   function of the final state; worker scheduling cannot change any
//!   output byte.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Article Files (JSON)                        │
//! └─────────────────────────────┬───────────────────────────────────┘
//!                               │ roster paths
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Phase 1: Ingestion Pool                       │
//! │  ┌─────────┐  ┌─────────┐  ┌─────────┐         ┌─────────┐     │
//! │  │Worker 1 │  │Worker 2 │  │Worker 3 │  ...    │Worker W │     │
//! │  └────┬────┘  └────┬────┘  └────┬────┘         └────┬────┘     │
//! │       └────────────┴─────┬──────┴────────────────────┘          │
//! │                          ▼                                      │
//! │                 ┌─────────────────┐                             │
//! │                 │  Shared Corpus  │  (append-only, batched)     │
//! │                 └────────┬────────┘                             │
//! └──────────────────────────┼──────────────────────────────────────┘
//!                            │ join barrier (corpus frozen)
//!                            ▼
//!                 ┌──────────────────────┐
//!                 │ Phase 2: Aggregator  │  (single-threaded)
//!                 │  dedup + tallies     │
//!                 └──────────┬───────────┘
//!                            │ unique English articles
//!                            ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                Phase 3: Keyword Extraction Pool                  │
//! │        workers ──► concurrent keyword → uuid-set index           │
//! └──────────────────────────┬──────────────────────────────────────┘
//!                            │ join barrier
//!                            ▼
//!                  Statistics ──► report files
//! ```
//!
//! # Example
//!
//! ```bash
//! # Default worker count, reports into the working directory
//! corpus-stats articles.txt inputs.txt
//!
//! # Eight workers, reports into a directory
//! corpus-stats articles.txt inputs.txt -w 8 -o reports/
//! ```

pub mod article;
pub mod config;
pub mod corpus;
pub mod error;
pub mod pipeline;
pub mod progress;
pub mod report;
pub mod roster;
pub mod stats;

pub use article::Article;
pub use config::{CliArgs, RunConfig};
pub use corpus::{Corpus, CorpusWriter};
pub use error::{Result, StatsError};
pub use pipeline::{PipelineCoordinator, RunResult, WorkQueue};
pub use report::ReportBuilder;
pub use roster::AuxiliaryLists;
pub use stats::Statistics;

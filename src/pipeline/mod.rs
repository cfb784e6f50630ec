//! Two-phase parallel aggregation pipeline
//!
//! This module implements the concurrent half of the system: a FIFO
//! work queue drained by fixed-size worker pools, with a hard join
//! barrier between phases.
//!
//! # Architecture
//!
//! ```text
//!  paths ──► WorkQueue ──► ingest pool (W) ──► Corpus
//!                                                │ join barrier
//!                                                ▼
//!                                     single-threaded aggregation
//!                                                │
//!                         unique English ──► WorkQueue ──► keyword pool (W)
//!                                                              │ join barrier
//!                                                              ▼
//!                                                         Statistics
//! ```

pub mod coordinator;
pub mod ingest;
pub mod keyword;
pub mod queue;

pub use coordinator::{PipelineCoordinator, RunResult};
pub use ingest::{IngestStats, IngestTotals, IngestWorker};
pub use keyword::{extract_keywords, KeywordIndex, KeywordStats, KeywordWorker};
pub use queue::{QueueStats, WorkQueue, WorkQueueHandle};

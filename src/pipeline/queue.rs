//! Work queue shared by a worker pool
//!
//! This module provides the FIFO both parallel phases drain: file paths
//! during ingestion, unique English articles during keyword extraction.
//! The queue is seeded once before the pool starts and only ever popped
//! afterwards - no priority, no reordering, no re-enqueue.
//!
//! The empty-check and the pop are a single atomic operation on the
//! underlying channel, so no two workers can observe the same item as
//! available.

use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Statistics for the work queue
#[derive(Debug, Default)]
pub struct QueueStats {
    /// Total items enqueued
    pub enqueued: AtomicU64,

    /// Total items dequeued
    pub dequeued: AtomicU64,
}

impl QueueStats {
    /// Get number of items handed out so far
    pub fn dequeued(&self) -> u64 {
        self.dequeued.load(Ordering::Relaxed)
    }
}

/// FIFO work queue, seeded once and drained by a worker pool
pub struct WorkQueue<T> {
    /// Sender used only for the initial load
    sender: Sender<T>,

    /// Receiver cloned into each worker handle
    receiver: Receiver<T>,

    /// Queue statistics
    stats: Arc<QueueStats>,
}

impl<T> WorkQueue<T> {
    /// Create an empty queue
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();

        Self {
            sender,
            receiver,
            stats: Arc::new(QueueStats::default()),
        }
    }

    /// Create a queue pre-loaded with the given items, in order
    pub fn seeded(items: impl IntoIterator<Item = T>) -> Self {
        let queue = Self::new();
        queue.seed(items);
        queue
    }

    /// Load items into the queue, in order
    pub fn seed(&self, items: impl IntoIterator<Item = T>) {
        let mut count = 0u64;
        for item in items {
            // Send on an unbounded channel only fails when every
            // receiver is gone, and we hold one.
            let _ = self.sender.send(item);
            count += 1;
        }
        self.stats.enqueued.fetch_add(count, Ordering::Relaxed);
    }

    /// Get a pop handle for this queue (clone per worker)
    pub fn handle(&self) -> WorkQueueHandle<T> {
        WorkQueueHandle {
            receiver: self.receiver.clone(),
            stats: Arc::clone(&self.stats),
        }
    }

    /// Get queue statistics
    pub fn stats(&self) -> Arc<QueueStats> {
        Arc::clone(&self.stats)
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Get current queue length
    pub fn len(&self) -> usize {
        self.receiver.len()
    }
}

impl<T> Default for WorkQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for popping work items from the queue
#[derive(Clone)]
pub struct WorkQueueHandle<T> {
    receiver: Receiver<T>,
    stats: Arc<QueueStats>,
}

impl<T> WorkQueueHandle<T> {
    /// Pop the next item, or None when the queue has drained
    ///
    /// The queue is fully seeded before workers start, so an empty
    /// queue means the phase's work is exhausted, not that more may
    /// arrive later.
    pub fn pop(&self) -> Option<T> {
        match self.receiver.try_recv() {
            Ok(item) => {
                self.stats.dequeued.fetch_add(1, Ordering::Relaxed);
                Some(item)
            }
            Err(_) => None,
        }
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

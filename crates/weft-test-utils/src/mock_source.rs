// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock order source for deterministic testing.
//!
//! `MockOrderSource` implements `OrderSource` with pre-configured batches,
//! enabling fast, CI-runnable tests without a feed server.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use weft_core::types::Batch;
use weft_core::{OrderSource, WeftError};

/// A mock order source that serves pre-configured batches.
///
/// Batches are popped from a FIFO queue; when the queue is empty, an empty
/// batch is served. Requested amounts are captured for assertions, and
/// [`set_offline`](Self::set_offline) makes every fetch fail the way an
/// unreachable feed would.
pub struct MockOrderSource {
    batches: Mutex<VecDeque<Batch>>,
    requests: Mutex<Vec<Option<u32>>>,
    offline: AtomicBool,
}

impl MockOrderSource {
    /// Create a new mock source with an empty batch queue.
    pub fn new() -> Self {
        Self {
            batches: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            offline: AtomicBool::new(false),
        }
    }

    /// Create a mock source pre-loaded with the given batches.
    pub fn with_batches(batches: Vec<Batch>) -> Self {
        Self {
            batches: Mutex::new(VecDeque::from(batches)),
            requests: Mutex::new(Vec::new()),
            offline: AtomicBool::new(false),
        }
    }

    /// Create a mock source serving one batch parsed from raw wire records,
    /// dirt included, exactly as a real fetch would parse them.
    pub fn with_wire_records(records: &[serde_json::Value]) -> Self {
        Self::with_batches(vec![Batch::parse(records)])
    }

    /// Add a batch to the end of the queue.
    pub async fn add_batch(&self, batch: Batch) {
        self.batches.lock().await.push_back(batch);
    }

    /// Make every subsequent fetch fail with `SourceUnavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// The `amount` argument of every fetch so far, in call order.
    pub async fn requests(&self) -> Vec<Option<u32>> {
        self.requests.lock().await.clone()
    }

    /// How many fetches have been made.
    pub async fn fetch_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

impl Default for MockOrderSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderSource for MockOrderSource {
    async fn fetch(&self, amount: Option<u32>) -> Result<Batch, WeftError> {
        self.requests.lock().await.push(amount);

        if self.offline.load(Ordering::SeqCst) {
            return Err(WeftError::SourceUnavailable {
                message: "mock source is offline".to_string(),
                source: None,
            });
        }

        Ok(self.batches.lock().await.pop_front().unwrap_or_default())
    }
}

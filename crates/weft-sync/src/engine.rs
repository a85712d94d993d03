// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reconciliation engine driving fetch-then-upsert cycles.
//!
//! The [`SyncEngine`] owns the reconciliation contract: the fetch completes
//! before the first store write, rejects are logged and counted but never
//! stored, and every valid record is upserted keyed on its external id.
//! Syncing the same batch twice leaves the store byte for byte identical.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use weft_core::{OrderRepository, OrderSource, SyncReport, WeftError};

/// Drives reconciliation between an order source and the local store.
pub struct SyncEngine {
    source: Arc<dyn OrderSource>,
    store: Arc<dyn OrderRepository>,
}

impl SyncEngine {
    pub fn new(source: Arc<dyn OrderSource>, store: Arc<dyn OrderRepository>) -> Self {
        Self { source, store }
    }

    /// Run one reconciliation cycle.
    ///
    /// `amount` of `None` lets the source pick the batch size. A source
    /// failure returns before anything is written. A store failure aborts
    /// the cycle mid-batch; re-running is safe because upserts are
    /// idempotent.
    pub async fn sync_once(&self, amount: Option<u32>) -> Result<SyncReport, WeftError> {
        // 1. Fetch the whole batch up front. Nothing is written until the
        //    source has answered, so an outage leaves the store untouched.
        let batch = self.source.fetch(amount).await?;

        let mut report = SyncReport::new();
        report.fetched = batch.fetched();
        report.skipped = batch.rejected.len();

        // 2. Rejects are counted and logged, never stored.
        for reject in &batch.rejected {
            warn!(
                run_id = %report.run_id,
                index = reject.index,
                reason = %reject.reason,
                "skipping invalid record"
            );
        }

        // 3. Upsert every valid record, tallying what each one did.
        for order in batch.orders {
            let external_id = order.external_id;
            let outcome = self.store.upsert(order).await?;
            debug!(run_id = %report.run_id, external_id, ?outcome, "order reconciled");
            report.record(outcome);
        }

        info!(
            run_id = %report.run_id,
            fetched = report.fetched,
            created = report.created,
            updated = report.updated,
            unchanged = report.unchanged,
            skipped = report.skipped,
            "sync cycle complete"
        );
        Ok(report)
    }

    /// Run [`sync_once`](Self::sync_once) on a fixed interval until the
    /// token is cancelled.
    ///
    /// Cycles are serialized: the next tick fires only after the previous
    /// cycle finished, and missed ticks are delayed rather than bursted.
    /// Failed cycles are logged and the loop keeps going; the next tick
    /// may succeed.
    pub async fn run_watch(&self, every: Duration, amount: Option<u32>, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // Skip the first immediate tick.
        interval.tick().await;

        info!(interval_secs = every.as_secs(), "watch loop started");

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = self.sync_once(amount).await {
                        warn!(error = %e, "scheduled sync failed (non-fatal)");
                    }
                }
                _ = cancel.cancelled() => {
                    info!("watch loop stopping");
                    break;
                }
            }
        }
    }
}

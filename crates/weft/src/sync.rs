// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `weft sync` command implementation.
//!
//! One-shot by default; `--watch` keeps reconciling on the configured
//! interval until SIGINT or SIGTERM.

use std::sync::Arc;
use std::time::Duration;

use weft_client::HttpOrderSource;
use weft_config::WeftConfig;
use weft_core::{SyncReport, WeftError};
use weft_sync::{install_signal_handler, SyncEngine};
use weft_store::SqliteStore;

/// Run the `weft sync` command.
///
/// A failed one-shot run leaves the store untouched and exits non-zero, so
/// cron-style callers can tell an outage from an empty batch.
pub async fn run_sync(
    config: &WeftConfig,
    amount: Option<u32>,
    watch: bool,
) -> Result<(), WeftError> {
    crate::init_tracing(&config.service.log_level);

    // CLI flag wins over the configured batch size.
    let amount = amount.or(config.sync.amount);

    let source = Arc::new(HttpOrderSource::new(&config.source)?);
    let store = SqliteStore::open(&config.storage).await?;
    let engine = SyncEngine::new(source, Arc::new(store.clone()));

    if watch {
        let every = Duration::from_secs(config.sync.interval_secs);
        let cancel = install_signal_handler();
        engine.run_watch(every, amount, cancel).await;
    } else {
        let report = engine.sync_once(amount).await?;
        print_report(&report);
    }

    store.close().await
}

/// Print a one-shot sync report.
fn print_report(report: &SyncReport) {
    println!();
    println!("  weft sync ({})", report.run_id);
    println!("  {}", "-".repeat(35));
    println!("    Fetched:   {}", report.fetched);
    println!("    Created:   {}", report.created);
    println!("    Updated:   {}", report.updated);
    println!("    Unchanged: {}", report.unchanged);
    println!("    Skipped:   {}", report.skipped);
    println!();
}

// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `weft convert` command implementation.

use tracing::warn;
use weft_config::WeftConfig;
use weft_core::WeftError;
use weft_store::SqliteStore;
use weft_sync::delivery;

/// Run the `weft convert` command.
///
/// Without `--order`, converts every stored order that has no delivery yet;
/// per-record resolution failures are logged and counted, not fatal. With
/// `--order`, converts exactly that one. Asking again for an already
/// converted order warns and exits zero, matching the bulk pass.
pub async fn run_convert(config: &WeftConfig, order: Option<i64>) -> Result<(), WeftError> {
    crate::init_tracing(&config.service.log_level);

    let store = SqliteStore::open(&config.storage).await?;

    match order {
        Some(external_id) => match delivery::convert_order(&store, external_id).await {
            Ok(summary) => {
                println!(
                    "delivery {} created for order {} ({} x{})",
                    summary.delivery_id, summary.external_id, summary.product, summary.quantity
                );
            }
            Err(WeftError::AlreadyConverted { external_id }) => {
                warn!(external_id, "order is already converted; nothing to do");
            }
            Err(e) => return Err(e),
        },
        None => {
            let report = delivery::convert_pending(&store).await?;
            println!(
                "converted {} orders ({} already converted, {} failed)",
                report.converted, report.already_converted, report.failed
            );
        }
    }

    store.close().await
}

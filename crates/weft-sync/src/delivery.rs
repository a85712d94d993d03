// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Delivery derivation on top of the order repository.
//!
//! The repository owns the transactional convert operation; this module adds
//! the batch pass over pending orders and the per-record failure handling
//! callers expect. A record that cannot be resolved never aborts the rest of
//! the batch.

use tracing::{error, info, warn};

use weft_core::{ConvertReport, DeliverySummary, OrderRepository, WeftError};

/// Derive the delivery for one order.
///
/// Repository errors pass through untouched; [`WeftError::AlreadyConverted`]
/// is the caller's cue to warn and move on rather than fail.
pub async fn convert_order(
    store: &dyn OrderRepository,
    external_id: i64,
) -> Result<DeliverySummary, WeftError> {
    let summary = store.convert(external_id).await?;
    info!(
        external_id,
        delivery_id = summary.delivery_id,
        product = %summary.product,
        quantity = summary.quantity,
        "delivery created"
    );
    Ok(summary)
}

/// Derive deliveries for every order that has none yet.
///
/// Per-record failures are isolated: an order that is already converted or
/// cannot be resolved is counted and the pass continues. Store-level
/// failures abort the pass, since every remaining record would hit the same
/// wall.
pub async fn convert_pending(store: &dyn OrderRepository) -> Result<ConvertReport, WeftError> {
    let pending = store.pending_conversion().await?;
    info!(pending = pending.len(), "starting conversion pass");

    let mut report = ConvertReport::default();
    for external_id in pending {
        match store.convert(external_id).await {
            Ok(summary) => {
                info!(
                    external_id,
                    delivery_id = summary.delivery_id,
                    quantity = summary.quantity,
                    "delivery created"
                );
                report.converted += 1;
            }
            Err(WeftError::AlreadyConverted { .. }) => {
                // Converted between listing and processing; nothing to do.
                warn!(external_id, "order already converted, skipping");
                report.already_converted += 1;
            }
            Err(e @ WeftError::DeliveryResolution(_)) => {
                error!(external_id, error = %e, "delivery derivation failed");
                report.failed += 1;
            }
            Err(WeftError::OrderNotFound { .. }) => {
                // Row vanished between listing and processing.
                warn!(external_id, "pending order no longer exists");
                report.failed += 1;
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        converted = report.converted,
        already_converted = report.already_converted,
        failed = report.failed,
        "conversion pass complete"
    );
    Ok(report)
}

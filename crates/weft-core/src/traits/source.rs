// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Source trait for fetching order batches.

use async_trait::async_trait;

use crate::error::WeftError;
use crate::types::Batch;

/// A place order batches come from.
///
/// The production implementation speaks HTTP to the feed; tests substitute
/// canned batches. Implementations validate each record at the boundary and
/// return a [`Batch`] that separates parseable orders from rejects, so one
/// dirty record never aborts a fetch.
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// Fetches one batch of orders.
    ///
    /// `amount` of `None` lets the source choose the batch size, matching
    /// the feed's bare `/api/get_data` endpoint. Sources clamp oversized
    /// requests rather than failing them.
    async fn fetch(&self, amount: Option<u32>) -> Result<Batch, WeftError>;
}

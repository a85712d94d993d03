// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Repository trait for the local order store.

use async_trait::async_trait;

use crate::error::WeftError;
use crate::types::{DeliverySummary, ShirtOrder, StoredOrder, UpsertOutcome};

/// Persistence seam for reconciliation and conversion.
///
/// The production implementation is SQLite-backed; engine tests run against
/// an in-memory fake. Implementations own the reconciliation contract:
/// upserts key on `external_id`, touch mutable fields only, and never move
/// `state` or `converted`.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Inserts the order, or updates the existing row with the same
    /// external id.
    ///
    /// New rows start at the default state, unconverted. Existing rows keep
    /// `state` and `converted` exactly as they are; only the fetched fields
    /// (name, date, design, fast_ship, quantity, email) may change, and the
    /// row is rewritten only when at least one of them differs.
    async fn upsert(&self, order: ShirtOrder) -> Result<UpsertOutcome, WeftError>;

    /// Looks up one order by external id.
    async fn get(&self, external_id: i64) -> Result<Option<StoredOrder>, WeftError>;

    /// External ids of every order that has no delivery yet, oldest first.
    async fn pending_conversion(&self) -> Result<Vec<i64>, WeftError>;

    /// Derives the delivery for one order and marks it converted.
    ///
    /// Fails with [`WeftError::OrderNotFound`] for unknown ids and
    /// [`WeftError::AlreadyConverted`] when a delivery already exists; the
    /// check and the creation happen in one transaction so a second call
    /// can never produce a second delivery.
    async fn convert(&self, external_id: i64) -> Result<DeliverySummary, WeftError>;
}

// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the OrderRepository trait.

use async_trait::async_trait;
use tracing::debug;

use weft_config::model::StorageConfig;
use weft_core::{OrderRepository, WeftError};

use crate::database::Database;
use crate::models::{
    DeliverySummary, OrderState, ShirtOrder, StoredOrder, StoreSummary, UpsertOutcome,
};
use crate::queries;

/// SQLite-backed order store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. Cloning is cheap and shares the single writer
/// connection.
#[derive(Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Open the store at the configured path, creating the file and
    /// applying migrations as needed.
    pub async fn open(config: &StorageConfig) -> Result<Self, WeftError> {
        let db = Database::open_with(&config.database_path, config.wal_mode).await?;
        debug!(path = %config.database_path, "order store ready");
        Ok(Self { db })
    }

    /// Returns a reference to the underlying Database.
    pub fn database(&self) -> &Database {
        &self.db
    }

    // --- Board operations ---

    pub async fn list(&self, state: Option<OrderState>) -> Result<Vec<StoredOrder>, WeftError> {
        queries::orders::list(&self.db, state).await
    }

    pub async fn set_state(&self, external_id: i64, state: OrderState) -> Result<(), WeftError> {
        queries::orders::set_state(&self.db, external_id, state).await
    }

    pub async fn summary(&self) -> Result<StoreSummary, WeftError> {
        queries::orders::summary(&self.db).await
    }

    /// Checkpoint the WAL and close the connection.
    pub async fn close(self) -> Result<(), WeftError> {
        self.db.close().await
    }
}

#[async_trait]
impl OrderRepository for SqliteStore {
    async fn upsert(&self, order: ShirtOrder) -> Result<UpsertOutcome, WeftError> {
        queries::orders::upsert(&self.db, &order).await
    }

    async fn get(&self, external_id: i64) -> Result<Option<StoredOrder>, WeftError> {
        queries::orders::get_by_external_id(&self.db, external_id).await
    }

    async fn pending_conversion(&self) -> Result<Vec<i64>, WeftError> {
        queries::orders::pending_conversion(&self.db).await
    }

    async fn convert(&self, external_id: i64) -> Result<DeliverySummary, WeftError> {
        queries::deliveries::convert_order(&self.db, external_id).await
    }
}

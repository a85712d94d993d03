// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles a complete reconciliation stack with a mock
//! source, a temp SQLite store, and a wired engine. Provides
//! `sync_and_convert()` to drive the full pipeline in tests.

use std::sync::Arc;

use weft_config::model::StorageConfig;
use weft_core::types::Batch;
use weft_core::{ConvertReport, SyncReport, WeftError};
use weft_store::SqliteStore;
use weft_sync::{delivery, SyncEngine};

use crate::mock_source::MockOrderSource;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    batches: Vec<Batch>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            batches: Vec::new(),
        }
    }

    /// Queue batches for the mock source to serve, in order.
    pub fn with_batches(mut self, batches: Vec<Batch>) -> Self {
        self.batches = batches;
        self
    }

    /// Queue one batch parsed from raw wire records, dirt included.
    pub fn with_wire_records(mut self, records: &[serde_json::Value]) -> Self {
        self.batches.push(Batch::parse(records));
        self
    }

    /// Build the test harness, creating the temp store and wiring the engine.
    pub async fn build(self) -> Result<TestHarness, WeftError> {
        let temp_dir = tempfile::TempDir::new().map_err(WeftError::storage)?;
        let db_path = temp_dir.path().join("test.db");

        let storage_config = StorageConfig {
            database_path: db_path.to_string_lossy().to_string(),
            wal_mode: true,
        };
        let store = SqliteStore::open(&storage_config).await?;

        let source = Arc::new(MockOrderSource::with_batches(self.batches));
        let engine = SyncEngine::new(source.clone(), Arc::new(store.clone()));

        Ok(TestHarness {
            source,
            store,
            engine,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment with a mock source and temp storage.
///
/// All pieces are public so tests can drive them individually; the
/// convenience methods cover the common fetch-store-convert path.
pub struct TestHarness {
    /// The mock order source the engine fetches from.
    pub source: Arc<MockOrderSource>,
    /// SQLite store (temp DB, cleaned up on drop).
    pub store: SqliteStore,
    /// Engine wired to the mock source and the temp store.
    pub engine: SyncEngine,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Run one reconciliation cycle with a source-chosen batch size.
    pub async fn sync(&self) -> Result<SyncReport, WeftError> {
        self.engine.sync_once(None).await
    }

    /// Derive deliveries for everything pending.
    pub async fn convert_all(&self) -> Result<ConvertReport, WeftError> {
        delivery::convert_pending(&self.store).await
    }

    /// Drive the full pipeline: one sync cycle, then a conversion pass.
    pub async fn sync_and_convert(&self) -> Result<(SyncReport, ConvertReport), WeftError> {
        let synced = self.sync().await?;
        let converted = self.convert_all().await?;
        Ok((synced, converted))
    }
}

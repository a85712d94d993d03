// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end integration tests for the complete weft pipeline.
//!
//! The HTTP tests run the real feed router on an ephemeral port and point
//! the real client at it, so the bytes on the wire are the production
//! bytes. The rest drive an isolated TestHarness with temp SQLite.

use std::io::Write;
use std::sync::Arc;

use serde_json::json;
use weft_client::HttpOrderSource;
use weft_config::model::{SourceConfig, StorageConfig};
use weft_core::{OrderRepository, OrderState, OrderSupply};
use weft_feed::{Corpus, FeedState, Generator};
use weft_store::SqliteStore;
use weft_sync::{delivery, SyncEngine};
use weft_test_utils::TestHarness;

/// Serve the feed router on an ephemeral port; returns the base URL.
async fn spawn_feed(supply: Arc<dyn OrderSupply>) -> String {
    let state = FeedState {
        supply,
        max_amount: 50,
    };
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, weft_feed::router(state)).await.unwrap();
    });
    format!("http://{addr}")
}

fn source_for(base_url: &str) -> SourceConfig {
    SourceConfig {
        base_url: base_url.to_string(),
        timeout_secs: 3,
    }
}

async fn temp_store(dir: &tempfile::TempDir) -> SqliteStore {
    let config = StorageConfig {
        database_path: dir.path().join("weft.db").display().to_string(),
        wal_mode: true,
    };
    SqliteStore::open(&config).await.unwrap()
}

// ---- Test 1: Fetch-reconcile-convert over real HTTP ----

#[tokio::test]
async fn test_pipeline_syncs_and_converts_over_http() {
    let base_url = spawn_feed(Arc::new(Generator::new(1, 5, Some(7)))).await;
    let dir = tempfile::tempdir().unwrap();
    let store = temp_store(&dir).await;

    let source = Arc::new(HttpOrderSource::new(&source_for(&base_url)).unwrap());
    let engine = SyncEngine::new(source, Arc::new(store.clone()));

    let report = engine.sync_once(Some(8)).await.unwrap();
    assert_eq!(report.fetched, 8);
    assert_eq!(report.skipped, 0, "generated records always parse");
    // Independent draws can repeat an id, so only the total is fixed.
    assert!(report.created >= 1);
    assert_eq!(report.created + report.updated + report.unchanged, 8);

    let conversion = delivery::convert_pending(&store).await.unwrap();
    assert_eq!(conversion.converted, report.created);
    assert_eq!(conversion.failed, 0);

    let summary = store.summary().await.unwrap();
    assert_eq!(summary.orders, report.created as i64);
    assert_eq!(summary.deliveries, conversion.converted as i64);
    assert_eq!(summary.pending(), 0);

    store.close().await.unwrap();
}

// ---- Test 2: Corpus feed reconciles idempotently ----

#[tokio::test]
async fn test_corpus_feed_syncs_idempotently() {
    let records = json!([
        {"id": 1, "product": "Classic Tee - Navy", "date": "2026-08-20",
         "design": "Minimal", "fastShip": "True", "quantity": 4, "mail": "a@example.com"},
        {"id": 2, "product": "Heavy Tee - Black", "date": "2026-08-21",
         "design": "", "fastShip": "Fasle", "quantity": 2, "mail": "b@example.com"},
        {"id": 3, "product": "Pocket Tee - Sage", "date": "2026-08-21",
         "design": "Vintage", "fastShip": "False", "quantity": 9, "mail": "c@example.com"},
    ]);
    let mut corpus_file = tempfile::NamedTempFile::new().unwrap();
    corpus_file
        .write_all(records.to_string().as_bytes())
        .unwrap();

    let corpus = Corpus::load(corpus_file.path().to_str().unwrap(), 1, 3, Some(1)).unwrap();
    let base_url = spawn_feed(Arc::new(corpus)).await;

    let dir = tempfile::tempdir().unwrap();
    let store = temp_store(&dir).await;
    let source = Arc::new(HttpOrderSource::new(&source_for(&base_url)).unwrap());
    let engine = SyncEngine::new(source, Arc::new(store.clone()));

    // Asking for the whole corpus returns all three records, shuffled.
    let first = engine.sync_once(Some(3)).await.unwrap();
    assert_eq!(first.created, 3);

    let second = engine.sync_once(Some(3)).await.unwrap();
    assert_eq!(second.created, 0);
    assert_eq!(second.updated, 0);
    assert_eq!(second.unchanged, 3);

    store.close().await.unwrap();
}

// ---- Test 3: Feed outage fails the sync and leaves the store alone ----

#[tokio::test]
async fn test_feed_outage_fails_sync_and_leaves_store_empty() {
    // Bind and immediately drop to get an address nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dir = tempfile::tempdir().unwrap();
    let store = temp_store(&dir).await;
    let source = Arc::new(HttpOrderSource::new(&source_for(&format!("http://{addr}"))).unwrap());
    let engine = SyncEngine::new(source, Arc::new(store.clone()));

    let err = engine.sync_once(Some(5)).await.unwrap_err();
    assert!(err.is_outage(), "expected an outage, got {err}");

    let orders = store.list(None).await.unwrap();
    assert!(orders.is_empty(), "a failed fetch must not write");

    store.close().await.unwrap();
}

// ---- Test 4: Dirty records are skipped, never stored ----

#[tokio::test]
async fn test_dirty_records_are_skipped_not_stored() {
    let harness = TestHarness::builder()
        .with_wire_records(&[
            json!({"id": 10, "product": "Shirt", "quantity": 3, "fastShip": "Fasle"}),
            json!({"id": 11, "product": "", "quantity": 2}),
            json!({"id": 12, "product": "T-Shirt", "quantity": 0}),
            json!({"product": "Shirt", "quantity": 1}),
        ])
        .build()
        .await
        .unwrap();

    let (sync, conversion) = harness.sync_and_convert().await.unwrap();
    assert_eq!(sync.fetched, 4);
    assert_eq!(sync.created, 1);
    assert_eq!(sync.skipped, 3);
    assert_eq!(conversion.converted, 1);

    let orders = harness.store.list(None).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].external_id, 10);
    // The known feed typo reads as not-fast.
    assert!(!orders[0].fast_ship);
}

// ---- Test 5: Local workflow state survives a resync ----

#[tokio::test]
async fn test_board_state_survives_resync() {
    let harness = TestHarness::builder()
        .with_wire_records(&[
            json!({"id": 21, "product": "Zebra Tee", "quantity": 5, "date": "2026-08-20"}),
            json!({"id": 22, "product": "Alpha Tee", "quantity": 1, "date": "2026-08-20"}),
        ])
        .with_wire_records(&[
            json!({"id": 21, "product": "Zebra Tee", "quantity": 8, "date": "2026-08-20"}),
        ])
        .build()
        .await
        .unwrap();

    harness.sync().await.unwrap();

    // Board sorts alphabetically while nothing is converted.
    let orders = harness.store.list(None).await.unwrap();
    assert_eq!(orders[0].name, "Alpha Tee");

    // An operator moves one order, then the feed changes its quantity.
    harness.store.set_state(21, OrderState::Done).await.unwrap();
    let second = harness.sync().await.unwrap();
    assert_eq!(second.updated, 1);

    let order = harness.store.get(21).await.unwrap().unwrap();
    assert_eq!(order.quantity, 8, "reconciled fields follow the feed");
    assert_eq!(order.state, OrderState::Done, "local state stays local");

    // Converted orders sink below open ones.
    delivery::convert_order(&harness.store, 22).await.unwrap();
    let orders = harness.store.list(None).await.unwrap();
    assert_eq!(orders[0].name, "Zebra Tee");
    assert_eq!(orders[1].name, "Alpha Tee");
    assert!(orders[1].converted);
}

// ---- Test 6: Filtered listing only returns the asked-for state ----

#[tokio::test]
async fn test_list_filters_by_state() {
    let harness = TestHarness::builder()
        .with_wire_records(&[
            json!({"id": 31, "product": "Shirt", "quantity": 1}),
            json!({"id": 32, "product": "T-Shirt", "quantity": 2}),
            json!({"id": 33, "product": "Shirt", "quantity": 3}),
        ])
        .build()
        .await
        .unwrap();

    harness.sync().await.unwrap();
    harness
        .store
        .set_state(32, OrderState::InProcess)
        .await
        .unwrap();

    let in_process = harness
        .store
        .list(Some(OrderState::InProcess))
        .await
        .unwrap();
    assert_eq!(in_process.len(), 1);
    assert_eq!(in_process[0].external_id, 32);

    let to_do = harness.store.list(Some(OrderState::ToDo)).await.unwrap();
    assert_eq!(to_do.len(), 2);
}

// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route-level tests for the feed HTTP surface.

use std::collections::HashSet;
use std::io::Write;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use weft_core::ApiEnvelope;
use weft_feed::{router, Corpus, FeedState, Generator};

fn generator_state() -> FeedState {
    FeedState {
        supply: Arc::new(Generator::new(1, 5, Some(21))),
        max_amount: 50,
    }
}

fn corpus_state(records: usize, max_amount: u32) -> (FeedState, tempfile::NamedTempFile) {
    let entries: Vec<String> = (1..=records)
        .map(|id| {
            format!(
                r#"{{"id": {id}, "product": "Shirt", "date": "2026-08-20",
                    "design": "Classic", "fastShip": "False", "quantity": 1,
                    "mail": "user{id}@example.com"}}"#
            )
        })
        .collect();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(format!("[{}]", entries.join(",")).as_bytes())
        .unwrap();

    let supply = Corpus::load(file.path().to_str().unwrap(), 1, 5, Some(17)).unwrap();
    let state = FeedState {
        supply: Arc::new(supply),
        max_amount,
    };
    (state, file)
}

async fn get(state: FeedState, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

fn success_data(body: &[u8]) -> Vec<serde_json::Value> {
    match serde_json::from_slice::<ApiEnvelope>(body).unwrap() {
        ApiEnvelope::Success { data } => data,
        ApiEnvelope::Error { message } => panic!("unexpected error envelope: {message}"),
    }
}

#[tokio::test]
async fn root_reports_liveness() {
    let (status, body) = get(generator_state(), "/").await;
    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("weft order feed is running"));
}

#[tokio::test]
async fn get_data_serves_a_source_chosen_batch() {
    let (status, body) = get(generator_state(), "/api/get_data").await;
    assert_eq!(status, StatusCode::OK);

    // The wire envelope is status-tagged.
    let text = String::from_utf8(body.clone()).unwrap();
    assert!(text.contains(r#""status":"success""#));

    let data = success_data(&body);
    assert!((1..=5).contains(&data.len()));
}

#[tokio::test]
async fn sized_requests_return_exactly_that_many() {
    let (status, body) = get(generator_state(), "/api/get_data/7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(success_data(&body).len(), 7);
}

#[tokio::test]
async fn zero_and_negative_amounts_clamp_to_one() {
    let (_, body) = get(generator_state(), "/api/get_data/0").await;
    assert_eq!(success_data(&body).len(), 1);

    let (_, body) = get(generator_state(), "/api/get_data/-3").await;
    assert_eq!(success_data(&body).len(), 1);
}

#[tokio::test]
async fn oversized_requests_clamp_to_the_cap() {
    let (_, body) = get(generator_state(), "/api/get_data/500").await;
    assert_eq!(success_data(&body).len(), 50);
}

#[tokio::test]
async fn non_integer_amounts_are_rejected() {
    let (status, _) = get(generator_state(), "/api/get_data/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn corpus_samples_are_duplicate_free() {
    let (state, _file) = corpus_state(10, 50);
    for _ in 0..10 {
        let (status, body) = get(state.clone(), "/api/get_data/8").await;
        assert_eq!(status, StatusCode::OK);
        let data = success_data(&body);
        assert_eq!(data.len(), 8);
        let ids: HashSet<i64> = data.iter().map(|r| r["id"].as_i64().unwrap()).collect();
        assert_eq!(ids.len(), 8);
    }
}

#[tokio::test]
async fn corpus_caps_by_available_records() {
    let (state, _file) = corpus_state(4, 50);
    let (_, body) = get(state, "/api/get_data/50").await;
    assert_eq!(success_data(&body).len(), 4);
}

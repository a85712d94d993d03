// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the order feed.
//!
//! Handles GET /, GET /api/get_data, GET /api/get_data/{amount}.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, error};

use weft_core::ApiEnvelope;

use crate::server::FeedState;

/// Response body for GET /.
#[derive(Debug, Serialize)]
pub struct RootResponse {
    /// Liveness message.
    pub message: String,
}

/// GET /
///
/// Liveness message pointing at the data endpoint.
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "weft order feed is running. Use /api/get_data to fetch orders.".to_string(),
    })
}

/// GET /api/get_data
///
/// Returns a batch whose size the supplier chooses itself.
pub async fn get_data(State(state): State<FeedState>) -> Response {
    match state.supply.pick() {
        Ok(data) => {
            debug!(count = data.len(), "served source-chosen batch");
            (StatusCode::OK, Json(ApiEnvelope::success(data))).into_response()
        }
        Err(e) => supply_error(e),
    }
}

/// GET /api/get_data/{amount}
///
/// Returns a batch of up to `amount` records. The amount is clamped into
/// `[1, max_amount]`; the supplier may cap it further by availability.
pub async fn get_data_amount(
    State(state): State<FeedState>,
    Path(amount): Path<i64>,
) -> Response {
    let amount = clamp_amount(amount, state.max_amount);
    match state.supply.sample(amount) {
        Ok(data) => {
            debug!(requested = amount, count = data.len(), "served sized batch");
            (StatusCode::OK, Json(ApiEnvelope::success(data))).into_response()
        }
        Err(e) => supply_error(e),
    }
}

fn supply_error(e: weft_core::WeftError) -> Response {
    error!(error = %e, "order supply failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiEnvelope::error(e.to_string())),
    )
        .into_response()
}

/// Clamp a requested batch size into `[1, cap]`.
fn clamp_amount(raw: i64, cap: u32) -> usize {
    raw.clamp(1, cap as i64) as usize
}

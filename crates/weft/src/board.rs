// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `weft list` and `weft mark` command implementations.
//!
//! The board view lists stored orders the way the store sorts them:
//! unconverted first, then alphabetically by product name.

use weft_config::WeftConfig;
use weft_core::{OrderState, StoredOrder, WeftError};
use weft_store::SqliteStore;

/// Run the `weft list` command.
pub async fn run_list(config: &WeftConfig, state: Option<OrderState>) -> Result<(), WeftError> {
    let store = SqliteStore::open(&config.storage).await?;
    let orders = store.list(state).await?;

    if orders.is_empty() {
        println!("no orders stored");
    }
    for order in &orders {
        println!("{}", format_row(order));
    }

    store.close().await
}

/// Run the `weft mark` command.
///
/// Fails with an error (and a non-zero exit) when the order is unknown.
pub async fn run_mark(config: &WeftConfig, order: i64, state: OrderState) -> Result<(), WeftError> {
    let store = SqliteStore::open(&config.storage).await?;
    store.set_state(order, state).await?;
    println!("order {order} marked {state}");

    store.close().await
}

/// One board row: external id, state, conversion flag, date, product.
fn format_row(order: &StoredOrder) -> String {
    let date = order
        .date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "----------".to_string());
    let converted = if order.converted { "converted" } else { "open" };
    let fast = if order.fast_ship { "  fast" } else { "" };
    format!(
        "{:>6}  {:<10}  {:<9}  {}  {} x{}{}",
        order.external_id, order.state, converted, date, order.name, order.quantity, fast
    )
}

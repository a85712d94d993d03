// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities.
//!
//! The order-side types cross crate boundaries and live in
//! `weft-core::types`; this module re-exports them and adds the catalog and
//! delivery rows that only the store itself reads and writes.

use serde::Serialize;

pub use weft_core::types::{DeliverySummary, OrderState, ShirtOrder, StoredOrder, UpsertOutcome};

/// A product row, created on demand the first time an order names it.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub default_code: Option<String>,
    pub sellable: bool,
}

/// A partner row. Customers carry `customer_rank > 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Partner {
    pub id: i64,
    pub name: String,
    pub customer_rank: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Warehouse {
    pub id: i64,
    pub name: String,
    pub code: String,
}

/// Picking flavor for a warehouse. Only `outgoing` matters to conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationType {
    pub id: i64,
    pub warehouse_id: i64,
    pub kind: String,
    pub source_location: String,
    pub dest_location: String,
}

/// One delivery header, always paired with exactly one line.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub id: i64,
    pub order_id: i64,
    pub partner_id: i64,
    pub operation_type_id: i64,
    pub source_location: String,
    pub dest_location: String,
    pub scheduled_date: String,
    pub origin: String,
}

/// One movement line under a delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryLine {
    pub id: i64,
    pub delivery_id: i64,
    pub product_id: i64,
    pub description: String,
    pub quantity: u32,
}

/// Aggregate counts rendered by `weft status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoreSummary {
    pub orders: i64,
    pub to_do: i64,
    pub in_process: i64,
    pub done: i64,
    pub delivered: i64,
    pub converted: i64,
    pub deliveries: i64,
}

impl StoreSummary {
    /// Orders still waiting for a delivery.
    pub fn pending(&self) -> i64 {
        self.orders - self.converted
    }
}

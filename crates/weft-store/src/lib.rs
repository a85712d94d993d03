// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Weft order pipeline.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a single-writer
//! concurrency model via `tokio-rusqlite`, and typed operations for order
//! reconciliation, the delivery catalog, and order-to-delivery conversion.

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;
pub mod repository;

pub use database::Database;
pub use models::*;
pub use repository::SqliteStore;

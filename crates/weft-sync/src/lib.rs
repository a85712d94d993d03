// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reconciliation and delivery derivation for the weft order pipeline.
//!
//! [`SyncEngine`] pulls batches from an [`OrderSource`] and reconciles them
//! into an [`OrderRepository`]; the [`delivery`] module turns reconciled
//! orders into deliveries. Both sides are trait seams, so the engine runs
//! identically against the HTTP feed and the canned sources tests use.
//!
//! [`OrderSource`]: weft_core::OrderSource
//! [`OrderRepository`]: weft_core::OrderRepository

pub mod delivery;
pub mod engine;
pub mod shutdown;

pub use engine::SyncEngine;
pub use shutdown::install_signal_handler;

// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP order source for the Weft pipeline.
//!
//! This crate implements `OrderSource` over the feed's REST surface: the
//! envelope is parsed, boundary-validated into a `Batch`, and transient
//! upstream failures are retried once before the sync engine sees them.

pub mod client;

pub use client::HttpOrderSource;

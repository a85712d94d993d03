// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the pipeline stages.
//!
//! Reconciliation talks to an [`OrderSource`] and an [`OrderRepository`];
//! the feed serves records out of an [`OrderSupply`]. Each seam has a real
//! implementation in its own crate and fakes in tests.

pub mod repository;
pub mod source;
pub mod supply;

// Re-export all traits at the traits module level for convenience.
pub use repository::OrderRepository;
pub use source::OrderSource;
pub use supply::OrderSupply;

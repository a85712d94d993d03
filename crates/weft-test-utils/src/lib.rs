// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for weft integration tests.
//!
//! Provides a mock order source and test harness infrastructure for fast,
//! deterministic, CI-runnable tests without a live feed.
//!
//! # Components
//!
//! - [`MockOrderSource`] - Mock source with pre-configured batches
//! - [`TestHarness`] - Full stack (mock source, temp store, engine) in one

pub mod harness;
pub mod mock_source;

pub use harness::TestHarness;
pub use mock_source::MockOrderSource;

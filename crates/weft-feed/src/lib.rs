// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shirt-order feed HTTP API.
//!
//! An axum server exposing the order feed: a liveness root plus two batch
//! endpoints, backed by either a pseudorandom generator or a fixed JSON
//! corpus. Both suppliers sit behind the `OrderSupply` trait so the server
//! and its callers never care which one is wired in.

pub mod corpus;
pub mod generator;
pub mod handlers;
pub mod server;

pub use corpus::Corpus;
pub use generator::Generator;
pub use server::{router, start_server, FeedState, ServerConfig};

// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `weft serve` command implementation.
//!
//! Assembles the order supply (generated or corpus-backed) and hands it to
//! the feed server, which runs until the process is stopped.

use std::sync::Arc;

use tracing::info;
use weft_config::WeftConfig;
use weft_core::{OrderSupply, WeftError};
use weft_feed::{start_server, Corpus, FeedState, Generator, ServerConfig};

/// Run the `weft serve` command.
///
/// With `[feed].corpus_path` set, every batch is sampled from that file;
/// otherwise batches are generated on the fly. A seed makes either supply
/// reproducible.
pub async fn run_serve(config: &WeftConfig) -> Result<(), WeftError> {
    crate::init_tracing(&config.service.log_level);

    let feed = &config.feed;
    let supply: Arc<dyn OrderSupply> = match &feed.corpus_path {
        Some(path) => {
            let corpus = Corpus::load(path, feed.default_min, feed.default_max, feed.seed)?;
            info!(path = %path, records = corpus.count().unwrap_or(0), "serving orders from corpus");
            Arc::new(corpus)
        }
        None => {
            info!("serving generated orders");
            Arc::new(Generator::new(feed.default_min, feed.default_max, feed.seed))
        }
    };

    let state = FeedState {
        supply,
        max_amount: feed.max_amount,
    };
    let server = ServerConfig {
        host: feed.host.clone(),
        port: feed.port,
    };

    start_server(&server, state).await
}

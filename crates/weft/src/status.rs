// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `weft status` command implementation.
//!
//! Reads the store summary and pings the feed, then reports both. Falls
//! back gracefully when the feed is not running.

use std::io::IsTerminal;

use serde::Serialize;
use weft_client::HttpOrderSource;
use weft_config::WeftConfig;
use weft_core::WeftError;
use weft_store::models::StoreSummary;
use weft_store::SqliteStore;

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub feed_online: bool,
    pub feed_url: String,
    pub database_path: String,
    pub orders: i64,
    pub to_do: i64,
    pub in_process: i64,
    pub done: i64,
    pub delivered: i64,
    pub converted: i64,
    pub pending: i64,
    pub deliveries: i64,
}

impl StatusResponse {
    fn new(summary: &StoreSummary, feed_online: bool, feed_url: &str, database_path: &str) -> Self {
        Self {
            feed_online,
            feed_url: feed_url.to_string(),
            database_path: database_path.to_string(),
            orders: summary.orders,
            to_do: summary.to_do,
            in_process: summary.in_process,
            done: summary.done,
            delivered: summary.delivered,
            converted: summary.converted,
            pending: summary.pending(),
            deliveries: summary.deliveries,
        }
    }
}

/// Run the `weft status` command.
///
/// Shows the stored totals and whether the feed answers. If `--json` is
/// passed, outputs structured JSON for scripting. If `--plain` is passed
/// or stdout is not a TTY, disables colors.
pub async fn run_status(config: &WeftConfig, json: bool, plain: bool) -> Result<(), WeftError> {
    let store = SqliteStore::open(&config.storage).await?;
    let summary = store.summary().await?;
    store.close().await?;

    let source = HttpOrderSource::new(&config.source)?;
    let feed_online = source.ping().await.is_ok();

    let response = StatusResponse::new(
        &summary,
        feed_online,
        source.base_url(),
        &config.storage.database_path,
    );

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&response).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        let use_color = !plain && std::io::stdout().is_terminal();
        print_status(&response, use_color);
    }

    Ok(())
}

/// Print the status block with optional colors.
fn print_status(r: &StatusResponse, use_color: bool) {
    println!();
    println!("  weft status");
    println!("  {}", "-".repeat(35));

    if use_color {
        use colored::Colorize;
        if r.feed_online {
            println!(
                "    Feed:       {} {} ({})",
                "✓".green(),
                "online".green(),
                r.feed_url
            );
        } else {
            println!(
                "    Feed:       {} {} ({})",
                "✗".red(),
                "offline".red(),
                r.feed_url
            );
        }
    } else if r.feed_online {
        println!("    Feed:       [OK] online ({})", r.feed_url);
    } else {
        println!("    Feed:       [FAIL] offline ({})", r.feed_url);
    }

    println!(
        "    Orders:     {} ({} to-do, {} in-process, {} done, {} delivered)",
        r.orders, r.to_do, r.in_process, r.done, r.delivered
    );
    println!(
        "    Deliveries: {} ({} orders converted, {} pending)",
        r.deliveries, r.converted, r.pending
    );
    println!("    Store:      {}", r.database_path);

    if !r.feed_online {
        println!();
        println!("  Start with: weft serve");
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> StoreSummary {
        StoreSummary {
            orders: 12,
            to_do: 5,
            in_process: 3,
            done: 3,
            delivered: 1,
            converted: 7,
            deliveries: 7,
        }
    }

    #[test]
    fn response_maps_the_summary() {
        let resp = StatusResponse::new(&summary(), true, "http://127.0.0.1:8000", "/tmp/weft.db");
        assert_eq!(resp.orders, 12);
        assert_eq!(resp.converted, 7);
        assert_eq!(resp.pending, 5);
        assert_eq!(resp.deliveries, 7);
        assert!(resp.feed_online);
    }

    #[test]
    fn status_response_serializes() {
        let resp = StatusResponse::new(&summary(), true, "http://127.0.0.1:8000", "/tmp/weft.db");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"feed_online\":true"));
        assert!(json.contains("\"orders\":12"));
        assert!(json.contains("\"pending\":5"));
    }

    #[test]
    fn status_response_offline_serializes() {
        let resp = StatusResponse::new(&summary(), false, "http://127.0.0.1:8000", "/tmp/weft.db");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"feed_online\":false"));
    }
}

// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the weft order pipeline.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level weft configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WeftConfig {
    /// Service identity and logging settings.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Order-feed API server settings.
    #[serde(default)]
    pub feed: FeedConfig,

    /// Upstream order source settings (where `weft sync` fetches from).
    #[serde(default)]
    pub source: SourceConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Reconciliation loop settings.
    #[serde(default)]
    pub sync: SyncConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Display name of the service.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_service_name() -> String {
    "weft".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Order-feed API server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FeedConfig {
    /// Address to bind the feed server to.
    #[serde(default = "default_feed_host")]
    pub host: String,

    /// Port to bind the feed server to.
    #[serde(default = "default_feed_port")]
    pub port: u16,

    /// Smallest batch the feed picks when the caller names no amount.
    #[serde(default = "default_batch_min")]
    pub default_min: u32,

    /// Largest batch the feed picks when the caller names no amount.
    #[serde(default = "default_batch_max")]
    pub default_max: u32,

    /// Hard cap for `/api/get_data/{amount}`; larger requests are clamped.
    #[serde(default = "default_max_amount")]
    pub max_amount: u32,

    /// Path to a JSON corpus of wire records. `None` fabricates records
    /// with the generator instead.
    #[serde(default)]
    pub corpus_path: Option<String>,

    /// Seed for the record generator. `None` seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            host: default_feed_host(),
            port: default_feed_port(),
            default_min: default_batch_min(),
            default_max: default_batch_max(),
            max_amount: default_max_amount(),
            corpus_path: None,
            seed: None,
        }
    }
}

fn default_feed_host() -> String {
    "127.0.0.1".to_string()
}

fn default_feed_port() -> u16 {
    8000
}

fn default_batch_min() -> u32 {
    1
}

fn default_batch_max() -> u32 {
    5
}

fn default_max_amount() -> u32 {
    50
}

/// Upstream order source configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Base URL of the order feed.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds. The feed answers fast or not at all.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    3
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("weft").join("weft.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("weft.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Reconciliation loop configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    /// Batch size to request per cycle. `None` lets the source choose.
    #[serde(default)]
    pub amount: Option<u32>,

    /// Seconds between watch-loop cycles.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            amount: None,
            interval_secs: default_interval_secs(),
        }
    }
}

fn default_interval_secs() -> u64 {
    300 // 5 minutes
}

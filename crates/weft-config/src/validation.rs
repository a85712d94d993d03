// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as batch-size range ordering, URL schemes, and
//! non-empty paths.

use crate::diagnostic::ConfigError;
use crate::model::WeftConfig;

const KNOWN_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &WeftConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.service.log_level.trim();
    if !KNOWN_LOG_LEVELS.contains(&level) {
        errors.push(ConfigError::Validation {
            message: format!(
                "service.log_level `{level}` is not one of {}",
                KNOWN_LOG_LEVELS.join(", ")
            ),
        });
    }

    let host = config.feed.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "feed.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("feed.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.feed.default_min < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "feed.default_min must be at least 1, got {}",
                config.feed.default_min
            ),
        });
    }

    if config.feed.default_max < config.feed.default_min {
        errors.push(ConfigError::Validation {
            message: format!(
                "feed.default_max ({}) must not be below feed.default_min ({})",
                config.feed.default_max, config.feed.default_min
            ),
        });
    }

    if config.feed.max_amount < config.feed.default_max {
        errors.push(ConfigError::Validation {
            message: format!(
                "feed.max_amount ({}) must not be below feed.default_max ({})",
                config.feed.max_amount, config.feed.default_max
            ),
        });
    }

    let base_url = config.source.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "source.base_url must not be empty".to_string(),
        });
    } else if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!("source.base_url `{base_url}` must start with http:// or https://"),
        });
    }

    if config.source.timeout_secs < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "source.timeout_secs must be at least 1, got {}",
                config.source.timeout_secs
            ),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if let Some(amount) = config.sync.amount
        && amount < 1
    {
        errors.push(ConfigError::Validation {
            message: format!("sync.amount must be at least 1 when set, got {amount}"),
        });
    }

    if config.sync.interval_secs < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "sync.interval_secs must be at least 1, got {}",
                config.sync.interval_secs
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

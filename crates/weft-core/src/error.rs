// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Unified error type for all weft crates.

use thiserror::Error;

/// Top-level error for the weft order pipeline.
///
/// Every fallible operation across the workspace returns this type so that
/// callers get one taxonomy to match on, regardless of which crate failed.
#[derive(Debug, Error)]
pub enum WeftError {
    /// Configuration loading or validation failed.
    #[error("config error: {0}")]
    Config(String),

    /// Local store failure (connection, migration, query).
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The order source could not be reached or answered with an error.
    ///
    /// Reconciliation must leave the store untouched when this is returned.
    #[error("order source unavailable: {message}")]
    SourceUnavailable {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The source answered, but the body did not match the feed envelope.
    #[error("malformed source response: {0}")]
    MalformedResponse(String),

    /// A single fetched record failed validation.
    ///
    /// Per-record: the record is skipped, the rest of the batch proceeds.
    #[error("invalid order record: {reason}")]
    InvalidRecord { reason: String },

    /// No stored order carries the requested external id.
    #[error("no order with external id {external_id}")]
    OrderNotFound { external_id: i64 },

    /// The order already has a delivery; conversion refuses to run twice.
    #[error("order {external_id} is already converted")]
    AlreadyConverted { external_id: i64 },

    /// A catalog row needed to build a delivery could not be resolved.
    #[error("delivery resolution failed: {0}")]
    DeliveryResolution(String),

    /// Feed server failure (bind, serve).
    #[error("feed error: {message}")]
    Feed {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invariant violation that does not fit any other variant.
    #[error("internal error: {0}")]
    Internal(String),
}

impl WeftError {
    /// Wrap any error as a storage failure.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage(Box::new(err))
    }

    /// Wrap a transport error as a source outage.
    pub fn source_unavailable<E>(message: impl Into<String>, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::SourceUnavailable {
            message: message.into(),
            source: Some(Box::new(err)),
        }
    }

    /// Build an [`InvalidRecord`](Self::InvalidRecord) with a formatted reason.
    pub fn invalid_record(reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            reason: reason.into(),
        }
    }

    /// True when the error means the source was down, as opposed to the
    /// source answering with bad data.
    pub fn is_outage(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. })
    }
}

/// Convenience alias used across the workspace.
pub type Result<T> = std::result::Result<T, WeftError>;

// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the order feed.
//!
//! Provides [`HttpOrderSource`] which handles request construction, the
//! response envelope, and transient error retry.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, warn};

use weft_config::model::SourceConfig;
use weft_core::{ApiEnvelope, Batch, OrderSource, WeftError};

/// HTTP client for feed communication.
///
/// Manages the request timeout and retry logic for transient errors
/// (429, 500, 503). The base URL and timeout come from `[source]` config.
#[derive(Debug, Clone)]
pub struct HttpOrderSource {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl HttpOrderSource {
    /// Creates a new feed client from the given source configuration.
    pub fn new(config: &SourceConfig) -> Result<Self, WeftError> {
        let mut headers = HeaderMap::new();
        headers.insert("accept", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeftError::SourceUnavailable {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_retries: 1,
        })
    }

    /// The configured feed base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, amount: Option<u32>) -> String {
        match amount {
            Some(amount) => format!("{}/api/get_data/{amount}", self.base_url),
            None => format!("{}/api/get_data", self.base_url),
        }
    }

    /// Liveness check against the feed root. One shot, no retry.
    pub async fn ping(&self) -> Result<(), WeftError> {
        let url = format!("{}/", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| WeftError::SourceUnavailable {
                message: format!("feed ping failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(WeftError::SourceUnavailable {
                message: format!("feed ping returned {status}"),
                source: None,
            })
        }
    }
}

#[async_trait]
impl OrderSource for HttpOrderSource {
    /// Fetches one batch from the feed.
    ///
    /// On transient errors (429, 500, 503), retries once after a 1-second
    /// delay. An error envelope counts as a source failure even under a 200,
    /// so callers never mistake an outage for data.
    async fn fetch(&self, amount: Option<u32>) -> Result<Batch, WeftError> {
        let url = self.endpoint(amount);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying feed fetch after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response =
                self.client
                    .get(&url)
                    .send()
                    .await
                    .map_err(|e| WeftError::SourceUnavailable {
                        message: format!("feed request failed: {e}"),
                        source: Some(Box::new(e)),
                    })?;

            let status = response.status();
            debug!(status = %status, attempt, "feed response received");

            if status.is_success() {
                let body =
                    response
                        .text()
                        .await
                        .map_err(|e| WeftError::SourceUnavailable {
                            message: format!("failed to read feed body: {e}"),
                            source: Some(Box::new(e)),
                        })?;
                let envelope: ApiEnvelope = serde_json::from_str(&body).map_err(|e| {
                    WeftError::MalformedResponse(format!("bad feed envelope: {e}"))
                })?;
                return match envelope {
                    ApiEnvelope::Success { data } => Ok(Batch::parse(&data)),
                    ApiEnvelope::Error { message } => Err(WeftError::SourceUnavailable {
                        message: format!("feed reported an error: {message}"),
                        source: None,
                    }),
                };
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient feed error, will retry");
                last_error = Some(WeftError::SourceUnavailable {
                    message: format!("feed returned {status}: {body}"),
                    source: None,
                });
                continue;
            }

            // Non-transient error or exhausted retries.
            let body = response.text().await.unwrap_or_default();
            return Err(WeftError::SourceUnavailable {
                message: format!("feed returned {status}: {body}"),
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| WeftError::SourceUnavailable {
            message: "feed fetch failed after retries".into(),
            source: None,
        }))
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}

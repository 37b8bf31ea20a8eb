//! Stream health probing
//!
//! A probe is a HEAD-equivalent request against a stream's origin URL with
//! a hard timeout and bounded redirect following. Probing never returns an
//! error: any network-level failure (timeout, DNS, refused connection,
//! unsupported scheme) classifies as offline with HTTP status 0.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::models::StreamInfo;
use crate::services::check_log::{CheckLogEntry, CheckLogSink};

/// Redirect hops followed before giving up
const MAX_REDIRECTS: usize = 5;

/// Timeout for the enrichment range-fetch, independent of the probe timeout
const INSPECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Byte range requested by [`HealthProbe::inspect`]
const INSPECT_RANGE: &str = "bytes=0-100000";

/// Classified result of a single probe
#[derive(Debug, Clone, Copy)]
pub struct ProbeOutcome {
    pub online: bool,
    pub http_status: u16,
    pub response_time_ms: f64,
}

/// Reachability checking for stream origin URLs
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Probe a URL; infallible by contract
    async fn probe(&self, url: &str) -> ProbeOutcome;

    /// Best-effort metadata fetch; `None` on any failure
    async fn inspect(&self, url: &str) -> Option<StreamInfo>;
}

/// HTTP implementation of [`HealthProbe`]
pub struct HttpHealthProbe {
    client: Client,
    timeout: Duration,
    check_log: Option<Arc<dyn CheckLogSink>>,
}

impl HttpHealthProbe {
    pub fn new(timeout: Duration, check_log: Option<Arc<dyn CheckLogSink>>) -> Self {
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            timeout,
            check_log,
        }
    }
}

/// Online iff the final status lands in [200, 400), or is exactly 302.
///
/// The standalone 302 arm is intentionally kept even though the range
/// already covers it.
pub(crate) fn classify(status: u16) -> bool {
    (200..400).contains(&status) || status == 302
}

#[async_trait]
impl HealthProbe for HttpHealthProbe {
    async fn probe(&self, url: &str) -> ProbeOutcome {
        let started = Instant::now();
        let http_status = match self
            .client
            .head(url)
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(response) => response.status().as_u16(),
            Err(e) => {
                debug!("Probe failed for {}: {}", url, e);
                0
            }
        };
        let response_time_ms = started.elapsed().as_secs_f64() * 1000.0;

        let outcome = ProbeOutcome {
            online: classify(http_status),
            http_status,
            response_time_ms,
        };

        if let Some(log) = &self.check_log {
            let entry = CheckLogEntry {
                checked_at: Utc::now(),
                url: url.to_string(),
                http_code: outcome.http_status,
                response_time_ms: outcome.response_time_ms,
                status: if outcome.online { "online" } else { "offline" }.to_string(),
            };
            if let Err(e) = log.append(&entry).await {
                warn!("Check log append failed: {}", e);
            }
        }

        outcome
    }

    async fn inspect(&self, url: &str) -> Option<StreamInfo> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::RANGE, INSPECT_RANGE)
            .timeout(INSPECT_TIMEOUT)
            .send()
            .await
            .ok()?;

        if !classify(response.status().as_u16()) {
            return None;
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let content_length = response.content_length().map(|n| n as i64);

        Some(StreamInfo {
            content_type,
            content_length,
        })
    }
}

//! Aggregate usage metrics.
//!
//! [`MetricsCollector::record`] is the only writer. Derived values (uptime and
//! the mean latency) are computed when a [`MetricsSnapshot`] is taken, under
//! the same lock as the counters, so a snapshot never mixes two states.
//!
//! Requests rejected by the rate limiter never reach `record`; the numbers
//! here describe admitted traffic only.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct Accumulators {
    total_requests: u64,
    requests_by_endpoint: HashMap<String, u64>,
    latency_sum: f64,
    latency_count: u64,
}

/// Point-in-time copy of the metrics, serialized as the `/api/stats` body.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    /// Admitted requests recorded so far
    pub total_requests: u64,
    /// Seconds since the collector was created
    pub uptime_seconds: f64,
    /// Mean response time in seconds, 0 when nothing has been recorded
    pub avg_response_time: f64,
    /// Request count per path
    pub requests_by_endpoint: BTreeMap<String, u64>,
}

impl MetricsSnapshot {
    /// Uptime as a [`Duration`].
    pub fn uptime(&self) -> Duration {
        Duration::from_secs_f64(self.uptime_seconds.max(0.0))
    }
}

/// Shared request metrics.
///
/// Cloning is cheap and clones share state.
#[derive(Clone, Debug)]
pub struct MetricsCollector {
    started_at: Instant,
    inner: Arc<Mutex<Accumulators>>,
}

impl MetricsCollector {
    /// Creates a collector whose uptime starts now.
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            inner: Arc::new(Mutex::new(Accumulators::default())),
        }
    }

    /// Records one handled request.
    pub async fn record(&self, endpoint: &str, latency: Duration) {
        self.record_seconds(endpoint, latency.as_secs_f64()).await;
    }

    /// Records one handled request with its latency in seconds.
    pub async fn record_seconds(&self, endpoint: &str, latency_seconds: f64) {
        let mut acc = self.inner.lock().await;
        acc.total_requests += 1;
        *acc
            .requests_by_endpoint
            .entry(endpoint.to_string())
            .or_insert(0) += 1;
        acc.latency_sum += latency_seconds;
        acc.latency_count += 1;
    }

    /// Takes an owned snapshot of the current metrics.
    pub async fn snapshot(&self) -> MetricsSnapshot {
        let acc = self.inner.lock().await;
        let avg_response_time = if acc.latency_count == 0 {
            0.0
        } else {
            acc.latency_sum / acc.latency_count as f64
        };

        MetricsSnapshot {
            total_requests: acc.total_requests,
            uptime_seconds: self.started_at.elapsed().as_secs_f64(),
            avg_response_time,
            requests_by_endpoint: acc
                .requests_by_endpoint
                .iter()
                .map(|(endpoint, count)| (endpoint.clone(), *count))
                .collect(),
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

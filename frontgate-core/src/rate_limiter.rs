//! Rate limiting implementation for FrontGate.
//!
//! Provides per-client rate limiting using a sliding window log: every
//! admitted request leaves a timestamp, and a client is admitted only while
//! fewer than `max_requests` timestamps fall inside the trailing window.
//!
//! # Algorithm
//!
//! On each call to [`RateLimiter::admit`]:
//! - Timestamps older than the window are dropped from the client's log
//! - If the remaining count is at or above the limit, the request is rejected
//!   and nothing is recorded
//! - Otherwise the current instant is appended and the request is admitted
//!
//! # Memory Management
//!
//! Client windows are created lazily and, by default, never removed. When a
//! cleanup threshold is configured, windows that have gone empty are swept
//! once the number of tracked clients exceeds the threshold, at most once per
//! cleanup interval.
//!
//! # Thread Safety
//!
//! State lives behind a single `tokio::sync::Mutex`, held only for the
//! in-memory update.
//!
//! # Example
//!
//! ```
//! use frontgate_core::{RateLimitConfig, RateLimiter};
//! use std::time::Duration;
//!
//! # tokio_test_block_on(async {
//! let limiter = RateLimiter::new(RateLimitConfig {
//!     max_requests: 2,
//!     window_duration: Duration::from_secs(60),
//! });
//!
//! assert!(limiter.admit("192.168.1.1").await);
//! assert!(limiter.admit("192.168.1.1").await);
//! assert!(!limiter.admit("192.168.1.1").await);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

use crate::types::{RateLimitCleanupConfig, RateLimitConfig};

/// Timestamps of admitted requests inside the trailing window, oldest first.
pub type ClientWindow = VecDeque<Instant>;

#[derive(Debug, Default)]
struct LimiterState {
    windows: HashMap<String, ClientWindow>,
    last_cleanup: Option<Instant>,
}

/// Per-client sliding window rate limiter.
///
/// Cloning is cheap and clones share state.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    cleanup: RateLimitCleanupConfig,
    state: Arc<Mutex<LimiterState>>,
}

impl RateLimiter {
    /// Creates a rate limiter that never sweeps idle clients.
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_cleanup(config, RateLimitCleanupConfig::disabled())
    }

    /// Creates a rate limiter with an idle-client sweep policy.
    pub fn with_cleanup(config: RateLimitConfig, cleanup: RateLimitCleanupConfig) -> Self {
        Self {
            config,
            cleanup,
            state: Arc::new(Mutex::new(LimiterState::default())),
        }
    }

    /// Returns the quota this limiter enforces.
    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Decides whether a request from `client_id` is admitted.
    ///
    /// Returns `true` if the request is admitted, `false` if it should be
    /// answered with 429. Rejected attempts are not recorded.
    pub async fn admit(&self, client_id: &str) -> bool {
        self.admit_at(client_id, Instant::now()).await
    }

    pub(crate) async fn admit_at(&self, client_id: &str, now: Instant) -> bool {
        let window = self.config.window_duration;
        let mut state = self.state.lock().await;

        if self.should_sweep(&state, now) {
            state.last_cleanup = Some(now);
            let before = state.windows.len();
            state.windows.retain(|_, timestamps| {
                prune(timestamps, now, window);
                !timestamps.is_empty()
            });
            let removed = before - state.windows.len();
            if removed > 0 {
                debug!(
                    removed_clients = removed,
                    remaining_clients = state.windows.len(),
                    "Rate limiter cleanup completed"
                );
            }
        }

        let timestamps = state.windows.entry(client_id.to_string()).or_default();
        prune(timestamps, now, window);

        if timestamps.len() >= self.config.max_requests as usize {
            return false;
        }

        timestamps.push_back(now);
        true
    }

    fn should_sweep(&self, state: &LimiterState, now: Instant) -> bool {
        if !self.cleanup.is_enabled() || state.windows.len() <= self.cleanup.threshold {
            return false;
        }
        match state.last_cleanup {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.cleanup.interval,
        }
    }

    /// Number of client identities currently tracked.
    pub async fn tracked_clients(&self) -> usize {
        self.state.lock().await.windows.len()
    }

    /// Number of timestamps recorded for a client, without pruning.
    pub async fn window_len(&self, client_id: &str) -> usize {
        self.state
            .lock()
            .await
            .windows
            .get(client_id)
            .map_or(0, VecDeque::len)
    }
}

/// Drops timestamps that are `window` or more older than `now`.
fn prune(timestamps: &mut ClientWindow, now: Instant, window: Duration) {
    while let Some(oldest) = timestamps.front() {
        if now.saturating_duration_since(*oldest) >= window {
            timestamps.pop_front();
        } else {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max_requests: u32, window_secs: u64) -> RateLimiter {
        RateLimiter::new(RateLimitConfig {
            max_requests,
            window_duration: Duration::from_secs(window_secs),
        })
    }

    // ===========================================
    // Basic rate limiting tests
    // ===========================================

    #[tokio::test]
    async fn test_first_request_allowed() {
        let limiter = limiter(5, 60);
        assert!(limiter.admit("192.168.1.1").await);
    }

    #[tokio::test]
    async fn test_requests_within_limit_allowed() {
        let limiter = limiter(5, 60);

        for i in 0..5 {
            let allowed = limiter.admit("192.168.1.1").await;
            assert!(allowed, "Request {} should be allowed", i + 1);
        }
    }

    #[tokio::test]
    async fn test_request_at_quota_boundary_rejected() {
        let limiter = limiter(3, 60);

        for _ in 0..3 {
            assert!(limiter.admit("192.168.1.1").await);
        }

        assert!(
            !limiter.admit("192.168.1.1").await,
            "Request exceeding limit should be blocked"
        );
    }

    #[tokio::test]
    async fn test_different_clients_independent() {
        let limiter = limiter(2, 60);

        assert!(limiter.admit("192.168.1.1").await);
        assert!(limiter.admit("192.168.1.1").await);
        assert!(!limiter.admit("192.168.1.1").await);

        // Second client still has its full quota
        assert!(limiter.admit("192.168.1.2").await);
        assert!(limiter.admit("192.168.1.2").await);
        assert!(!limiter.admit("192.168.1.2").await);
    }

    #[tokio::test]
    async fn test_rejected_attempts_not_recorded() {
        let limiter = limiter(1, 60);

        assert!(limiter.admit("192.168.1.1").await);
        for _ in 0..5 {
            assert!(!limiter.admit("192.168.1.1").await);
        }

        assert_eq!(limiter.window_len("192.168.1.1").await, 1);
    }

    #[tokio::test]
    async fn test_ipv6_addresses() {
        let limiter = limiter(2, 60);

        assert!(limiter.admit("::1").await);
        assert!(limiter.admit("::1").await);
        assert!(!limiter.admit("::1").await);

        assert!(limiter.admit("2001:db8::1").await);
    }

    // ===========================================
    // Sliding window tests
    // ===========================================

    #[tokio::test]
    async fn test_admitted_again_after_window_elapses() {
        let limiter = limiter(3, 60);
        let start = Instant::now();

        for i in 0..3 {
            assert!(limiter.admit_at("10.0.0.1", start + Duration::from_secs(i)).await);
        }
        assert!(!limiter.admit_at("10.0.0.1", start + Duration::from_secs(30)).await);

        // Window fully elapsed since the last admitted request
        assert!(limiter.admit_at("10.0.0.1", start + Duration::from_secs(62)).await);
        assert_eq!(limiter.window_len("10.0.0.1").await, 1);
    }

    #[tokio::test]
    async fn test_window_slides_one_request_at_a_time() {
        let limiter = limiter(2, 10);
        let start = Instant::now();

        assert!(limiter.admit_at("10.0.0.1", start).await);
        assert!(limiter.admit_at("10.0.0.1", start + Duration::from_secs(5)).await);
        assert!(!limiter.admit_at("10.0.0.1", start + Duration::from_secs(9)).await);

        // Only the first timestamp has aged out
        assert!(limiter.admit_at("10.0.0.1", start + Duration::from_secs(10)).await);
        assert!(!limiter.admit_at("10.0.0.1", start + Duration::from_secs(11)).await);
    }

    #[tokio::test]
    async fn test_timestamp_exactly_window_old_is_pruned() {
        let limiter = limiter(1, 60);
        let start = Instant::now();

        assert!(limiter.admit_at("10.0.0.1", start).await);
        assert!(!limiter.admit_at("10.0.0.1", start + Duration::from_secs(59)).await);
        assert!(limiter.admit_at("10.0.0.1", start + Duration::from_secs(60)).await);
    }

    // ===========================================
    // Shared state tests
    // ===========================================

    #[tokio::test]
    async fn test_limiter_clone_shares_state() {
        let limiter1 = limiter(2, 60);
        let limiter2 = limiter1.clone();

        assert!(limiter1.admit("192.168.1.1").await);
        assert!(limiter2.admit("192.168.1.1").await);
        assert!(!limiter1.admit("192.168.1.1").await);
    }

    #[tokio::test]
    async fn test_concurrent_admissions_respect_quota() {
        let limiter = limiter(10, 60);
        let mut handles = Vec::new();

        for _ in 0..50 {
            let limiter = limiter.clone();
            handles.push(tokio::spawn(
                async move { limiter.admit("10.0.0.1").await },
            ));
        }

        let mut admitted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 10);
    }

    // ===========================================
    // Cleanup tests
    // ===========================================

    #[tokio::test]
    async fn test_keys_never_removed_without_cleanup() {
        let limiter = limiter(100, 1);
        let start = Instant::now();

        for i in 0..100 {
            limiter.admit_at(&format!("192.168.1.{}", i), start).await;
        }
        limiter
            .admit_at("10.0.0.1", start + Duration::from_secs(120))
            .await;

        assert_eq!(limiter.tracked_clients().await, 101);
    }

    #[tokio::test]
    async fn test_cleanup_sweeps_idle_clients() {
        let limiter = RateLimiter::with_cleanup(
            RateLimitConfig {
                max_requests: 10,
                window_duration: Duration::from_secs(1),
            },
            RateLimitCleanupConfig {
                threshold: 5,
                interval: Duration::from_secs(1),
            },
        );
        let start = Instant::now();

        for i in 0..10 {
            limiter.admit_at(&format!("10.0.0.{}", i), start).await;
        }
        assert_eq!(limiter.tracked_clients().await, 10);

        // All previous windows are empty by now
        limiter
            .admit_at("10.0.1.1", start + Duration::from_secs(5))
            .await;
        assert_eq!(limiter.tracked_clients().await, 1);
    }

    #[tokio::test]
    async fn test_cleanup_respects_interval() {
        let limiter = RateLimiter::with_cleanup(
            RateLimitConfig {
                max_requests: 10,
                window_duration: Duration::from_secs(1),
            },
            RateLimitCleanupConfig {
                threshold: 1,
                interval: Duration::from_secs(60),
            },
        );
        let start = Instant::now();

        limiter.admit_at("a", start).await;
        limiter.admit_at("b", start).await;
        // First sweep happens here and removes nothing still active
        limiter.admit_at("c", start).await;
        assert_eq!(limiter.tracked_clients().await, 3);

        // Windows are empty but the interval has not passed
        limiter.admit_at("d", start + Duration::from_secs(5)).await;
        assert_eq!(limiter.tracked_clients().await, 4);

        limiter.admit_at("e", start + Duration::from_secs(61)).await;
        assert_eq!(limiter.tracked_clients().await, 1);
    }
}

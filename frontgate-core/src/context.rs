//! Shared server state.
//!
//! A [`ServerContext`] is built once at startup and handed to every request
//! as an `Arc`. Each subsystem guards its own state, so requests only contend
//! on the subsystem they are touching.

use crate::cache::ContentCache;
use crate::metrics::MetricsCollector;
use crate::rate_limiter::RateLimiter;
use crate::types::ConfigProvider;

/// Configuration plus the three stateful subsystems of the request pipeline.
#[derive(Debug)]
pub struct ServerContext<C: ConfigProvider> {
    config: C,
    limiter: RateLimiter,
    cache: ContentCache,
    metrics: MetricsCollector,
}

impl<C: ConfigProvider> ServerContext<C> {
    /// Builds the subsystems from `config`.
    pub fn new(config: C) -> Self {
        let limiter = RateLimiter::with_cleanup(
            config.rate_limit_config().clone(),
            config.rate_limit_cleanup_config().clone(),
        );
        let cache = ContentCache::new(config.static_config().cache_max_size);

        Self {
            config,
            limiter,
            cache,
            metrics: MetricsCollector::new(),
        }
    }

    /// Configuration the context was built from.
    pub fn config(&self) -> &C {
        &self.config
    }

    /// Per-client rate limiter.
    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Static file content cache.
    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    /// Request metrics.
    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }
}

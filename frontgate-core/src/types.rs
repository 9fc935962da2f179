//! Type definitions for FrontGate configuration.
//!
//! This module contains the configuration types read by the request pipeline
//! and its subsystems:
//! - Rate limiting configuration and the optional key sweep
//! - Static bundle location and cache bound
//! - Compression and client identity switches

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::defaults;

// ============================================================================
// Composable Configuration Traits
// ============================================================================

/// Configuration for rate limiting behavior.
pub trait RateLimitingProvider: Send + Sync {
    /// Returns the rate limiting configuration.
    fn rate_limit_config(&self) -> &RateLimitConfig;

    /// Returns the rate limiter cleanup configuration.
    fn rate_limit_cleanup_config(&self) -> &RateLimitCleanupConfig;
}

/// Configuration for the static frontend bundle.
pub trait StaticContentProvider: Send + Sync {
    /// Returns the bundle root and cache settings.
    fn static_config(&self) -> &StaticConfig;
}

/// Configuration for response compression.
pub trait CompressionProvider: Send + Sync {
    /// Returns true if gzip may be applied to eligible responses.
    fn gzip_enabled(&self) -> bool;
}

/// Server-level switches that do not belong to a single subsystem.
pub trait ServerProvider: Send + Sync {
    /// Returns true if the client identity may be taken from `X-Forwarded-For`.
    fn trust_forwarded_for(&self) -> bool;
}

// ============================================================================
// ConfigProvider - Aggregated trait for full configuration
// ============================================================================

/// Trait for complete configuration injection.
///
/// This trait combines all specialized configuration traits into one.
/// Implement the individual traits to provide configuration from any source:
/// - [`RateLimitingProvider`] for rate limiting settings
/// - [`StaticContentProvider`] for the bundle root and cache bound
/// - [`CompressionProvider`] for the gzip switch
/// - [`ServerProvider`] for client identity
///
/// # Example
///
/// ```
/// use frontgate_core::{
///     CompressionProvider, RateLimitCleanupConfig, RateLimitConfig, RateLimitingProvider,
///     ServerProvider, StaticConfig, StaticContentProvider,
/// };
/// use std::time::Duration;
///
/// struct MyConfig {
///     rate_limit: RateLimitConfig,
///     cleanup: RateLimitCleanupConfig,
///     static_files: StaticConfig,
/// }
///
/// impl RateLimitingProvider for MyConfig {
///     fn rate_limit_config(&self) -> &RateLimitConfig { &self.rate_limit }
///     fn rate_limit_cleanup_config(&self) -> &RateLimitCleanupConfig { &self.cleanup }
/// }
///
/// impl StaticContentProvider for MyConfig {
///     fn static_config(&self) -> &StaticConfig { &self.static_files }
/// }
///
/// impl CompressionProvider for MyConfig {
///     fn gzip_enabled(&self) -> bool { true }
/// }
///
/// impl ServerProvider for MyConfig {
///     fn trust_forwarded_for(&self) -> bool { false }
/// }
///
/// let config = MyConfig {
///     rate_limit: RateLimitConfig { max_requests: 100, window_duration: Duration::from_secs(60) },
///     cleanup: RateLimitCleanupConfig::disabled(),
///     static_files: StaticConfig::new("frontend/build", 50),
/// };
/// assert!(config.rate_limit_config().is_valid());
/// ```
pub trait ConfigProvider:
    RateLimitingProvider + StaticContentProvider + CompressionProvider + ServerProvider
{
}

// Blanket implementation: any type implementing all sub-traits is a ConfigProvider
impl<T> ConfigProvider for T where
    T: RateLimitingProvider + StaticContentProvider + CompressionProvider + ServerProvider
{
}

/// Configuration for rate limiting per client.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use frontgate_core::RateLimitConfig;
///
/// let config = RateLimitConfig {
///     max_requests: 100,
///     window_duration: Duration::from_secs(60),
/// };
///
/// assert!(config.is_valid());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Maximum number of admitted requests per client within the window
    pub max_requests: u32,
    /// Length of the trailing window
    pub window_duration: Duration,
}

impl RateLimitConfig {
    /// Returns `true` if the configuration is valid.
    ///
    /// A valid configuration has at least one allowed request and a non-zero window.
    pub fn is_valid(&self) -> bool {
        self.max_requests > 0 && !self.window_duration.is_zero()
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: defaults::RATE_LIMIT_REQUESTS,
            window_duration: defaults::RATE_LIMIT_WINDOW,
        }
    }
}

/// Configuration for the optional sweep of idle client windows.
///
/// With the default threshold of zero the rate limiter keeps every client it
/// has ever seen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitCleanupConfig {
    /// Number of tracked clients before a sweep is considered (0 = disabled)
    pub threshold: usize,
    /// Minimum interval between sweeps
    pub interval: Duration,
}

impl RateLimitCleanupConfig {
    /// A configuration that never sweeps.
    pub fn disabled() -> Self {
        Self {
            threshold: 0,
            interval: defaults::RATE_LIMIT_CLEANUP_INTERVAL,
        }
    }

    /// Returns `true` if automatic cleanup is enabled.
    pub fn is_enabled(&self) -> bool {
        self.threshold > 0
    }
}

impl Default for RateLimitCleanupConfig {
    fn default() -> Self {
        Self {
            threshold: defaults::RATE_LIMIT_CLEANUP_THRESHOLD,
            interval: defaults::RATE_LIMIT_CLEANUP_INTERVAL,
        }
    }
}

/// Location of the frontend bundle and the content cache bound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticConfig {
    /// Directory holding the built frontend
    pub bundle_root: PathBuf,
    /// Maximum number of files kept in memory
    pub cache_max_size: usize,
}

impl StaticConfig {
    /// Creates a static configuration.
    pub fn new(bundle_root: impl Into<PathBuf>, cache_max_size: usize) -> Self {
        Self {
            bundle_root: bundle_root.into(),
            cache_max_size,
        }
    }

    /// Path of the application shell document.
    pub fn index_path(&self) -> PathBuf {
        self.bundle_root.join(defaults::INDEX_FILE)
    }

    /// Bundle root as a path.
    pub fn bundle_root(&self) -> &Path {
        &self.bundle_root
    }

    /// Returns `true` if the cache can hold at least one file.
    pub fn is_valid(&self) -> bool {
        self.cache_max_size > 0
    }
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self::new(defaults::FRONTEND_DIR, defaults::CACHE_MAX_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===========================================
    // RateLimitConfig tests
    // ===========================================

    #[test]
    fn test_rate_limit_config_valid() {
        let config = RateLimitConfig {
            max_requests: 100,
            window_duration: Duration::from_secs(60),
        };
        assert!(config.is_valid());
    }

    #[test]
    fn test_rate_limit_config_invalid_zero_requests() {
        let config = RateLimitConfig {
            max_requests: 0,
            window_duration: Duration::from_secs(60),
        };
        assert!(!config.is_valid());
    }

    #[test]
    fn test_rate_limit_config_invalid_zero_duration() {
        let config = RateLimitConfig {
            max_requests: 100,
            window_duration: Duration::ZERO,
        };
        assert!(!config.is_valid());
    }

    #[test]
    fn test_rate_limit_config_default() {
        let config = RateLimitConfig::default();
        assert_eq!(config.max_requests, 100);
        assert_eq!(config.window_duration, Duration::from_secs(60));
    }

    // ===========================================
    // RateLimitCleanupConfig tests
    // ===========================================

    #[test]
    fn test_cleanup_disabled_by_default() {
        assert!(!RateLimitCleanupConfig::default().is_enabled());
        assert!(!RateLimitCleanupConfig::disabled().is_enabled());
    }

    #[test]
    fn test_cleanup_config_enabled() {
        let config = RateLimitCleanupConfig {
            threshold: 1,
            interval: Duration::from_secs(1),
        };
        assert!(config.is_enabled());
    }

    // ===========================================
    // StaticConfig tests
    // ===========================================

    #[test]
    fn test_static_config_default() {
        let config = StaticConfig::default();
        assert_eq!(config.bundle_root, PathBuf::from("frontend/build"));
        assert_eq!(config.cache_max_size, 50);
        assert!(config.is_valid());
    }

    #[test]
    fn test_static_config_index_path() {
        let config = StaticConfig::new("/srv/app", 10);
        assert_eq!(config.index_path(), PathBuf::from("/srv/app/index.html"));
    }

    #[test]
    fn test_static_config_zero_cache_invalid() {
        let config = StaticConfig::new("/srv/app", 0);
        assert!(!config.is_valid());
    }
}

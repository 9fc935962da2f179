//! Test utilities for FrontGate.
//!
//! This module provides shared test configuration and a throwaway frontend
//! bundle used across unit tests.
//! It is only compiled when running tests (`#[cfg(test)]`).

use crate::types::{
    CompressionProvider, RateLimitCleanupConfig, RateLimitConfig, RateLimitingProvider,
    ServerProvider, StaticConfig, StaticContentProvider,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// Shared test configuration for unit tests.
///
/// This struct implements all configuration traits with sensible defaults
/// and builder methods for customization.
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub rate_limit: RateLimitConfig,
    pub cleanup: RateLimitCleanupConfig,
    pub static_files: StaticConfig,
    pub gzip: bool,
    pub trust_forwarded_for: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            rate_limit: RateLimitConfig {
                max_requests: 100,
                window_duration: Duration::from_secs(60),
            },
            cleanup: RateLimitCleanupConfig::disabled(),
            static_files: StaticConfig::new("frontend/build", 50),
            gzip: true,
            trust_forwarded_for: false,
        }
    }
}

impl TestConfig {
    /// Create a new test configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure rate limiting.
    pub fn with_rate_limit(mut self, max_requests: u32, window_secs: u64) -> Self {
        self.rate_limit = RateLimitConfig {
            max_requests,
            window_duration: Duration::from_secs(window_secs),
        };
        self
    }

    /// Configure cleanup threshold.
    pub fn with_cleanup(mut self, threshold: usize) -> Self {
        self.cleanup.threshold = threshold;
        self
    }

    /// Toggle gzip.
    pub fn with_gzip(mut self, enabled: bool) -> Self {
        self.gzip = enabled;
        self
    }

    /// Serve from `root`.
    pub fn with_bundle_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.static_files.bundle_root = root.into();
        self
    }

    /// Configure the content cache bound.
    pub fn with_cache_max_size(mut self, max_size: usize) -> Self {
        self.static_files.cache_max_size = max_size;
        self
    }

    /// Trust `X-Forwarded-For` for client identity.
    pub fn with_trust_forwarded_for(mut self, trust: bool) -> Self {
        self.trust_forwarded_for = trust;
        self
    }
}

impl RateLimitingProvider for TestConfig {
    fn rate_limit_config(&self) -> &RateLimitConfig {
        &self.rate_limit
    }

    fn rate_limit_cleanup_config(&self) -> &RateLimitCleanupConfig {
        &self.cleanup
    }
}

impl StaticContentProvider for TestConfig {
    fn static_config(&self) -> &StaticConfig {
        &self.static_files
    }
}

impl CompressionProvider for TestConfig {
    fn gzip_enabled(&self) -> bool {
        self.gzip
    }
}

impl ServerProvider for TestConfig {
    fn trust_forwarded_for(&self) -> bool {
        self.trust_forwarded_for
    }
}

/// Temporary frontend bundle, removed on drop.
#[derive(Debug)]
pub struct TempBundle {
    dir: TempDir,
}

impl TempBundle {
    /// Creates an empty bundle directory unique to this test.
    pub fn new() -> Self {
        let dir = tempfile::Builder::new()
            .prefix("frontgate-bundle-")
            .tempdir()
            .expect("create temp bundle");
        Self { dir }
    }

    /// Creates a bundle containing `index.html`.
    pub fn with_index(html: &str) -> Self {
        let bundle = Self::new();
        bundle.write("index.html", html);
        bundle
    }

    /// Writes a file relative to the bundle root, creating parent directories.
    pub fn write(&self, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        std::fs::write(&path, contents).expect("write bundle file");
        path
    }

    /// Bundle root.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Static configuration pointing at this bundle.
    pub fn static_config(&self, cache_max_size: usize) -> StaticConfig {
        StaticConfig::new(self.dir.path(), cache_max_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TestConfig::new();
        assert_eq!(config.rate_limit.max_requests, 100);
        assert_eq!(config.rate_limit.window_duration, Duration::from_secs(60));
        assert!(config.gzip);
        assert!(!config.trust_forwarded_for);
        assert!(!config.cleanup.is_enabled());
    }

    #[test]
    fn test_builder_methods() {
        let config = TestConfig::new()
            .with_rate_limit(5, 30)
            .with_gzip(false)
            .with_cache_max_size(3)
            .with_bundle_root("/srv/app")
            .with_trust_forwarded_for(true)
            .with_cleanup(10);

        assert_eq!(config.rate_limit.max_requests, 5);
        assert!(!config.gzip_enabled());
        assert_eq!(config.static_config().cache_max_size, 3);
        assert_eq!(config.static_config().bundle_root, PathBuf::from("/srv/app"));
        assert!(config.trust_forwarded_for());
        assert_eq!(config.cleanup.threshold, 10);
    }

    #[test]
    fn test_temp_bundle_removed_on_drop() {
        let root = {
            let bundle = TempBundle::with_index("<html></html>");
            assert!(bundle.path().join("index.html").is_file());
            bundle.path().to_path_buf()
        };
        assert!(!root.exists());
    }

    #[test]
    fn test_temp_bundle_nested_write() {
        let bundle = TempBundle::new();
        let path = bundle.write("static/css/main.css", "body {}");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "body {}");
    }
}

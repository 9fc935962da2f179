//! FrontGate Core - request pipeline for a single-page-application server
//!
//! This crate provides the pieces of a frontend server that sits in front of
//! a built SPA bundle:
//! - Per-client sliding window rate limiting
//! - A bounded in-memory file cache with insertion-order eviction
//! - Aggregate request metrics
//! - A small JSON API (`/api/health`, `/api/stats`, `/api/mock-data`)
//! - Static serving with SPA fallback, gzip and CORS
//!
//! # Overview
//!
//! Configuration is provided via the [`ConfigProvider`] trait, allowing
//! flexible configuration from any source. A [`ServerContext`] owns the
//! stateful subsystems and is passed to [`request_handler::handle_request`]
//! for every request.
//!
//! # Example
//!
//! ```rust,no_run
//! use frontgate_core::{
//!     CompressionProvider, RateLimitCleanupConfig, RateLimitConfig, RateLimitingProvider,
//!     ServerContext, ServerProvider, StaticConfig, StaticContentProvider,
//! };
//! use std::sync::Arc;
//!
//! struct MyConfig {
//!     rate_limit: RateLimitConfig,
//!     cleanup: RateLimitCleanupConfig,
//!     static_files: StaticConfig,
//! }
//!
//! impl RateLimitingProvider for MyConfig {
//!     fn rate_limit_config(&self) -> &RateLimitConfig { &self.rate_limit }
//!     fn rate_limit_cleanup_config(&self) -> &RateLimitCleanupConfig { &self.cleanup }
//! }
//!
//! impl StaticContentProvider for MyConfig {
//!     fn static_config(&self) -> &StaticConfig { &self.static_files }
//! }
//!
//! impl CompressionProvider for MyConfig {
//!     fn gzip_enabled(&self) -> bool { true }
//! }
//!
//! impl ServerProvider for MyConfig {
//!     fn trust_forwarded_for(&self) -> bool { false }
//! }
//!
//! let ctx = Arc::new(ServerContext::new(MyConfig {
//!     rate_limit: RateLimitConfig::default(),
//!     cleanup: RateLimitCleanupConfig::default(),
//!     static_files: StaticConfig::default(),
//! }));
//! ```
//!
//! # Modules
//!
//! - [`types`] - Configuration types and the [`ConfigProvider`] trait
//! - [`error`] - Error types and result aliases
//! - [`headers`] - HTTP header constants and the CORS policy
//! - [`rate_limiter`] - Sliding window rate limiting
//! - [`cache`] - File content cache
//! - [`metrics`] - Request metrics
//! - [`api`] - JSON API router
//! - [`static_files`] - Static path resolution
//! - [`request_handler`] - Per-request pipeline

#![forbid(unsafe_code)]

pub mod api;
pub mod cache;
pub mod client_ip;
pub mod compression;
pub mod content_type;
pub mod context;
pub mod defaults;
pub mod error;
pub mod headers;
pub mod metrics;
pub mod rate_limiter;
pub mod request_handler;
pub mod static_files;
#[cfg(test)]
pub mod test_utils;
pub mod types;

// Re-export commonly used items at crate root
pub use cache::ContentCache;
pub use context::ServerContext;
pub use error::{FrontGateError, Result};
pub use metrics::{MetricsCollector, MetricsSnapshot};
pub use rate_limiter::RateLimiter;
pub use types::{
    // Composable configuration traits
    CompressionProvider,
    // Aggregated configuration trait
    ConfigProvider,
    // Configuration structs
    RateLimitCleanupConfig,
    RateLimitConfig,
    RateLimitingProvider,
    ServerProvider,
    StaticConfig,
    StaticContentProvider,
};

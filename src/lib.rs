//! FrontGate - a static frontend server for single-page applications
//!
//! Serves a built SPA bundle with per-client rate limiting, an in-memory file
//! cache, gzip, CORS and a small JSON API.
//!
//! # Overview
//!
//! FrontGate provides:
//! - Sliding window rate limiting per client IP
//! - SPA fallback: unknown paths render `index.html`
//! - `/api/health`, `/api/stats` and `/api/mock-data`
//! - Structured logging with JSON support and a daily log file
//!
//! # Example
//!
//! ```rust,no_run
//! use frontgate::{config, server, ServerContext};
//! use std::sync::Arc;
//!
//! # async fn demo() -> frontgate::Result<()> {
//! let ctx = Arc::new(ServerContext::new(config::get_config().clone()));
//! let listener = server::bind("127.0.0.1:8000".parse().unwrap()).await?;
//! let tracker = server::run(listener, ctx, async {
//!     let _ = tokio::signal::ctrl_c().await;
//! })
//! .await;
//! tracker.wait_for_shutdown(server::SHUTDOWN_TIMEOUT).await;
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`config`] - Configuration management from environment variables
//! - [`env_vars`] - Environment variable constants
//! - [`server`] - Accept loop, banner and shutdown summary
//! - [`args`] - Command line argument parsing
//! - [`logging`] - Console and rolling file logging
//!
//! # Re-exports from frontgate-core
//!
//! Core functionality is provided by the `frontgate-core` crate:
//! - [`rate_limiter`] - Rate limiting implementation
//! - [`request_handler`] - Per-request pipeline
//! - [`types`] - Configuration traits and structs

#![forbid(unsafe_code)]

pub mod args;
pub mod config;
pub mod connection;
pub mod env_vars;
pub mod logging;
pub mod server;

// Re-export frontgate-core modules
pub use frontgate_core::rate_limiter;
pub use frontgate_core::request_handler;
pub use frontgate_core::types;

// Re-export commonly used items at crate root
pub use config::{EnvVarConfig, get_config};
pub use frontgate_core::{
    ConfigProvider, ContentCache, FrontGateError, MetricsCollector, MetricsSnapshot,
    RateLimitCleanupConfig, RateLimitConfig, RateLimiter, Result, ServerContext, StaticConfig,
};

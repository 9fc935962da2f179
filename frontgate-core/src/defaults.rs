//! Default configuration values for FrontGate.
//!
//! This module centralizes all default values used throughout FrontGate,
//! ensuring consistency between production code and tests.

use std::time::Duration;

/// Default listen port.
pub const PORT: u16 = 8000;

/// Default maximum requests per rate limit window.
pub const RATE_LIMIT_REQUESTS: u32 = 100;

/// Default rate limit window duration in seconds.
pub const RATE_LIMIT_WINDOW_SECS: u64 = 60;

/// Default rate limit window duration.
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(RATE_LIMIT_WINDOW_SECS);

/// Default cleanup threshold (0 keeps every client window for the process lifetime).
pub const RATE_LIMIT_CLEANUP_THRESHOLD: usize = 0;

/// Default cleanup interval in seconds.
pub const RATE_LIMIT_CLEANUP_INTERVAL_SECS: u64 = 60;

/// Default cleanup interval duration.
pub const RATE_LIMIT_CLEANUP_INTERVAL: Duration =
    Duration::from_secs(RATE_LIMIT_CLEANUP_INTERVAL_SECS);

/// Default number of files held by the content cache.
pub const CACHE_MAX_SIZE: usize = 50;

/// Default frontend bundle root, relative to the working directory.
pub const FRONTEND_DIR: &str = "frontend/build";

/// Document served for `/` and for unknown static paths.
pub const INDEX_FILE: &str = "index.html";

/// Default directory for the rolling log file.
pub const LOG_DIR: &str = "logs";

/// Content type used when the extension is unknown.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Separate backend API, shown in the startup banner only.
pub const BACKEND_API_URL: &str = "http://localhost:5000";

//! Environment variable names used throughout FrontGate configuration

/// Listening port
pub const PORT: &str = "PORT";

/// Debug mode (lowers the default log level to `debug`)
pub const DEBUG: &str = "DEBUG";

/// Rate limiting configuration
pub const RATE_LIMIT: &str = "RATE_LIMIT";
pub const RATE_LIMIT_WINDOW: &str = "RATE_LIMIT_WINDOW";
pub const RATE_LIMIT_CLEANUP_THRESHOLD: &str = "RATE_LIMIT_CLEANUP_THRESHOLD";
pub const RATE_LIMIT_CLEANUP_INTERVAL: &str = "RATE_LIMIT_CLEANUP_INTERVAL";

/// Response compression
pub const ENABLE_GZIP: &str = "ENABLE_GZIP";

/// Frontend bundle and content cache
pub const FRONTEND_DIR: &str = "FRONTEND_DIR";
pub const CACHE_MAX_SIZE: &str = "CACHE_MAX_SIZE";

/// Directory for the rolling log file
pub const LOG_DIR: &str = "LOG_DIR";

/// Take the client identity from `X-Forwarded-For`
pub const TRUST_FORWARDED_FOR: &str = "TRUST_FORWARDED_FOR";

/// Get all environment variable names for documentation/validation
pub fn all_env_vars() -> &'static [&'static str] {
    &[
        PORT,
        DEBUG,
        RATE_LIMIT,
        RATE_LIMIT_WINDOW,
        RATE_LIMIT_CLEANUP_THRESHOLD,
        RATE_LIMIT_CLEANUP_INTERVAL,
        ENABLE_GZIP,
        FRONTEND_DIR,
        CACHE_MAX_SIZE,
        LOG_DIR,
        TRUST_FORWARDED_FOR,
    ]
}

//! Configuration management for FrontGate.
//!
//! This module loads configuration from environment variables. Values are
//! read once, at first access, and cached for the lifetime of the process
//! using `once_cell::sync::Lazy`. Command line flags are layered on top by
//! the binary.
//!
//! Invalid values never abort startup: they are logged at `warn` and the
//! default is used instead.
//!
//! # Example
//!
//! ```
//! use frontgate::config;
//! use frontgate::types::RateLimitingProvider;
//!
//! let config = config::get_config();
//! println!("Max requests: {}", config.rate_limit_config().max_requests);
//! ```

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use once_cell::sync::Lazy;
use tracing::warn;

use crate::env_vars;
use frontgate_core::defaults;
use frontgate_core::{
    CompressionProvider, RateLimitCleanupConfig, RateLimitConfig, RateLimitingProvider,
    ServerProvider, StaticConfig, StaticContentProvider,
};

// ============================================================================
// Cached Configuration (computed once at first access)
// ============================================================================

static ENV_CONFIG: Lazy<EnvVarConfig> = Lazy::new(EnvVarConfig::from_env);

/// Returns the configuration read from the process environment.
pub fn get_config() -> &'static EnvVarConfig {
    &ENV_CONFIG
}

// ============================================================================
// Internal Helpers
// ============================================================================

/// Parses an environment variable with fallback to a default value.
///
/// Logs a warning if the value exists but cannot be parsed.
fn parse_env_var_or_default<T, F>(env_var: &F, var_name: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Result<String, env::VarError>,
{
    match env_var(var_name) {
        Ok(value) if value.trim().is_empty() => default,
        Ok(value) => match value.trim().parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(var = var_name, value = %value, "Invalid env var value, using default");
                default
            }
        },
        Err(_) => default,
    }
}

/// Parses a boolean flag: `true`/`false`, `1`/`0`, `yes`/`no` (case-insensitive).
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn parse_bool_env_var_or_default<F>(env_var: &F, var_name: &str, default: bool) -> bool
where
    F: Fn(&str) -> Result<String, env::VarError>,
{
    match env_var(var_name) {
        Ok(value) if value.trim().is_empty() => default,
        Ok(value) => parse_bool(&value).unwrap_or_else(|| {
            warn!(var = var_name, value = %value, "Invalid boolean env var value, using default");
            default
        }),
        Err(_) => default,
    }
}

/// Reads the log directory and debug flag ahead of the full configuration.
///
/// Used to install the logger before any other value is parsed, so that
/// parse warnings for the remaining variables are recorded.
pub fn logging_settings_from_env() -> (PathBuf, bool) {
    let env_var = |key: &str| env::var(key);
    (
        parse_env_var_or_default(&env_var, env_vars::LOG_DIR, PathBuf::from(defaults::LOG_DIR)),
        parse_bool_env_var_or_default(&env_var, env_vars::DEBUG, false),
    )
}

// ============================================================================
// EnvVarConfig - ConfigProvider implementation using environment variables
// ============================================================================

/// Configuration provider that reads from environment variables.
///
/// This is the configuration provider of the FrontGate CLI. Values are
/// captured when the struct is built; later changes to the environment are
/// not observed.
///
/// # Example
///
/// ```
/// use frontgate::config::EnvVarConfig;
/// use frontgate::types::CompressionProvider;
///
/// let config = EnvVarConfig::from_lookup(|key| match key {
///     "ENABLE_GZIP" => Ok("no".to_string()),
///     _ => Err(std::env::VarError::NotPresent),
/// });
/// assert!(!config.gzip_enabled());
/// assert_eq!(config.port, 8000);
/// ```
#[derive(Clone, Debug)]
pub struct EnvVarConfig {
    /// Listening port
    pub port: u16,
    /// Debug mode
    pub debug: bool,
    /// Gzip switch
    pub enable_gzip: bool,
    /// Directory for the rolling log file
    pub log_dir: PathBuf,
    /// Take client identity from `X-Forwarded-For`
    pub trust_forwarded_for: bool,
    rate_limit: RateLimitConfig,
    cleanup: RateLimitCleanupConfig,
    static_files: StaticConfig,
}

impl EnvVarConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key))
    }

    /// Reads the configuration through an arbitrary lookup function.
    pub fn from_lookup<F>(env_var: F) -> Self
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        Self {
            port: parse_env_var_or_default(&env_var, env_vars::PORT, defaults::PORT),
            debug: parse_bool_env_var_or_default(&env_var, env_vars::DEBUG, false),
            enable_gzip: parse_bool_env_var_or_default(&env_var, env_vars::ENABLE_GZIP, true),
            log_dir: parse_env_var_or_default(
                &env_var,
                env_vars::LOG_DIR,
                PathBuf::from(defaults::LOG_DIR),
            ),
            trust_forwarded_for: parse_bool_env_var_or_default(
                &env_var,
                env_vars::TRUST_FORWARDED_FOR,
                false,
            ),
            rate_limit: compute_rate_limit_config(&env_var),
            cleanup: compute_rate_limit_cleanup_config(&env_var),
            static_files: compute_static_config(&env_var),
        }
    }

    /// Overrides the listening port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Overrides the frontend bundle directory.
    pub fn with_frontend_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_files.bundle_root = dir.into();
        self
    }
}

impl Default for EnvVarConfig {
    fn default() -> Self {
        Self::from_lookup(|_| Err(env::VarError::NotPresent))
    }
}

/// Compute rate limiting configuration from environment variables
/// Invalid values fall back to defaults and log warnings
fn compute_rate_limit_config<F>(env_var: &F) -> RateLimitConfig
where
    F: Fn(&str) -> Result<String, env::VarError>,
{
    let max_requests = parse_env_var_or_default(
        env_var,
        env_vars::RATE_LIMIT,
        defaults::RATE_LIMIT_REQUESTS,
    );

    let window_secs = parse_env_var_or_default(
        env_var,
        env_vars::RATE_LIMIT_WINDOW,
        defaults::RATE_LIMIT_WINDOW_SECS,
    );

    let config = RateLimitConfig {
        max_requests,
        window_duration: Duration::from_secs(window_secs),
    };

    // Validate configuration
    if !config.is_valid() {
        warn!("Invalid rate limit configuration, using defaults");
        return RateLimitConfig::default();
    }

    config
}

/// Computes rate limiter cleanup configuration from environment variables.
fn compute_rate_limit_cleanup_config<F>(env_var: &F) -> RateLimitCleanupConfig
where
    F: Fn(&str) -> Result<String, env::VarError>,
{
    let threshold = parse_env_var_or_default(
        env_var,
        env_vars::RATE_LIMIT_CLEANUP_THRESHOLD,
        defaults::RATE_LIMIT_CLEANUP_THRESHOLD,
    );

    let interval_secs = parse_env_var_or_default(
        env_var,
        env_vars::RATE_LIMIT_CLEANUP_INTERVAL,
        defaults::RATE_LIMIT_CLEANUP_INTERVAL_SECS,
    );

    RateLimitCleanupConfig {
        threshold,
        interval: Duration::from_secs(interval_secs),
    }
}

/// Computes the bundle location and cache bound.
fn compute_static_config<F>(env_var: &F) -> StaticConfig
where
    F: Fn(&str) -> Result<String, env::VarError>,
{
    let bundle_root = parse_env_var_or_default(
        env_var,
        env_vars::FRONTEND_DIR,
        PathBuf::from(defaults::FRONTEND_DIR),
    );
    let cache_max_size =
        parse_env_var_or_default(env_var, env_vars::CACHE_MAX_SIZE, defaults::CACHE_MAX_SIZE);

    let config = StaticConfig::new(bundle_root, cache_max_size);
    if !config.is_valid() {
        warn!(
            var = env_vars::CACHE_MAX_SIZE,
            "Cache size must be at least 1, using default"
        );
        return StaticConfig::new(config.bundle_root, defaults::CACHE_MAX_SIZE);
    }

    config
}

impl RateLimitingProvider for EnvVarConfig {
    fn rate_limit_config(&self) -> &RateLimitConfig {
        &self.rate_limit
    }

    fn rate_limit_cleanup_config(&self) -> &RateLimitCleanupConfig {
        &self.cleanup
    }
}

impl StaticContentProvider for EnvVarConfig {
    fn static_config(&self) -> &StaticConfig {
        &self.static_files
    }
}

impl CompressionProvider for EnvVarConfig {
    fn gzip_enabled(&self) -> bool {
        self.enable_gzip
    }
}

impl ServerProvider for EnvVarConfig {
    fn trust_forwarded_for(&self) -> bool {
        self.trust_forwarded_for
    }
}

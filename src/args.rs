//! Command line argument parsing for FrontGate.
//!
//! This module defines the CLI interface using [`clap`] for argument parsing.
//! Flags override the matching environment variables.
//!
//! # Example
//!
//! ```no_run
//! use frontgate::args::Args;
//! use clap::Parser;
//!
//! let args = Args::parse();
//! if let Err(e) = args.validate() {
//!     eprintln!("Configuration error: {}", e);
//!     std::process::exit(1);
//! }
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Command line arguments for FrontGate.
///
/// # Example
///
/// ```no_run
/// use frontgate::args::Args;
/// use clap::Parser;
///
/// let args = Args::parse();
/// println!("Binding {} on port {:?}", args.bind, args.port);
/// ```
#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"))]
#[command(about = env!("CARGO_PKG_DESCRIPTION"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(
    long_about = "Serves a built single-page application with per-client rate limiting,\nan in-memory file cache, gzip and a small JSON API.\n\nExample usage:\n  frontgate\n  frontgate 8080 --frontend-dir dist --verbose"
)]
#[command(
    after_help = "Environment variables:\n  PORT                         Listening port (default: 8000)\n  DEBUG                        Debug logging (default: false)\n  RATE_LIMIT                   Max requests per window (default: 100)\n  RATE_LIMIT_WINDOW            Rate limit window seconds (default: 60)\n  ENABLE_GZIP                  Gzip eligible responses (default: true)\n  FRONTEND_DIR                 Built frontend directory (default: frontend/build)\n  CACHE_MAX_SIZE               Files kept in memory (default: 50)\n  LOG_DIR                      Log file directory (default: logs)\n  RATE_LIMIT_CLEANUP_THRESHOLD Tracked clients before sweeping (default: 0, disabled)\n  RATE_LIMIT_CLEANUP_INTERVAL  Seconds between sweeps (default: 60)\n  TRUST_FORWARDED_FOR          Rate limit by X-Forwarded-For (default: false)"
)]
pub struct Args {
    /// Port to listen on (overrides PORT)
    #[arg(value_name = "PORT")]
    pub port: Option<u16>,

    /// Address to bind to
    #[arg(
        long,
        short = 'b',
        help = "Bind address for listening",
        value_name = "ADDRESS",
        default_value = "0.0.0.0"
    )]
    pub bind: String,

    /// Directory containing the built frontend
    #[arg(
        long,
        short = 'd',
        help = "Built frontend directory (overrides FRONTEND_DIR)",
        value_name = "DIR"
    )]
    pub frontend_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(
        long,
        short = 'v',
        help = "Show detailed configuration and startup information"
    )]
    pub verbose: bool,

    /// Enable quiet mode (minimal output)
    #[arg(
        long,
        short = 'q',
        help = "Suppress configuration output, show only essential messages",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output logs in JSON format (for structured logging)
    #[arg(long, help = "Output logs in JSON format for structured logging")]
    pub json_logs: bool,
}

impl Args {
    /// Validates the parsed command line arguments.
    ///
    /// Performs the following validations:
    /// - An explicit port must be greater than 0
    /// - Bind address must be a valid IP address
    ///
    /// # Example
    ///
    /// ```
    /// use frontgate::args::Args;
    /// use clap::Parser;
    ///
    /// let args = Args::try_parse_from(["frontgate", "0"]).unwrap();
    /// assert!(args.validate().is_err());
    ///
    /// let args = Args::try_parse_from(["frontgate", "8080"]).unwrap();
    /// assert!(args.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), String> {
        if self.port == Some(0) {
            return Err("Port must be greater than 0".to_string());
        }

        // Validate bind address format
        if self.bind.parse::<std::net::IpAddr>().is_err() {
            return Err(format!("Invalid bind address: '{}'", self.bind));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let args = Args::try_parse_from(["frontgate"]).unwrap();
        assert_eq!(args.port, None);
        assert_eq!(args.bind, "0.0.0.0");
        assert!(args.frontend_dir.is_none());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_positional_port() {
        let args = Args::try_parse_from(["frontgate", "3000"]).unwrap();
        assert_eq!(args.port, Some(3000));
    }

    #[test]
    fn test_non_numeric_port_rejected() {
        assert!(Args::try_parse_from(["frontgate", "http"]).is_err());
    }

    #[test]
    fn test_frontend_dir_flag() {
        let args = Args::try_parse_from(["frontgate", "--frontend-dir", "dist"]).unwrap();
        assert_eq!(args.frontend_dir, Some(PathBuf::from("dist")));
    }

    #[test]
    fn test_invalid_bind_address() {
        let args = Args::try_parse_from(["frontgate", "--bind", "localhost"]).unwrap();
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Args::try_parse_from(["frontgate", "-v", "-q"]).is_err());
    }

    #[test]
    fn test_json_logs_flag() {
        let args = Args::try_parse_from(["frontgate", "--json-logs"]).unwrap();
        assert!(args.json_logs);
    }
}

//! Server loop and console output.
//!
//! [`run`] accepts connections until the shutdown future resolves, serving
//! each one on its own task through the request pipeline. The banner and the
//! shutdown summary are user-facing output and go to stdout.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{debug, warn};

use crate::args::Args;
use crate::config::EnvVarConfig;
use crate::connection::ConnectionTracker;
use crate::env_vars;
use crate::logging;
use frontgate_core::defaults;
use frontgate_core::request_handler;
use frontgate_core::{
    CompressionProvider, ConfigProvider, FrontGateError, MetricsSnapshot, RateLimitingProvider,
    Result, ServerContext, StaticContentProvider,
};

/// How long in-flight connections may run after shutdown is requested.
pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Pause after a failed `accept`, e.g. when file descriptors run out.
pub const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Binds the listening socket.
///
/// # Errors
///
/// [`FrontGateError::PortInUse`] when the address is taken, otherwise
/// [`FrontGateError::Bind`].
pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    TcpListener::bind(addr).await.map_err(|source| {
        if source.kind() == std::io::ErrorKind::AddrInUse {
            FrontGateError::PortInUse(addr.port())
        } else {
            FrontGateError::Bind {
                addr: addr.to_string(),
                source,
            }
        }
    })
}

/// Serves connections from `listener` until `shutdown` completes.
///
/// Returns the tracker of connections still being served, so the caller can
/// wait for them to drain.
pub async fn run<C, F>(
    listener: TcpListener,
    ctx: Arc<ServerContext<C>>,
    shutdown: F,
) -> ConnectionTracker
where
    C: ConfigProvider + 'static,
    F: Future<Output = ()>,
{
    let tracker = ConnectionTracker::new();
    tokio::pin!(shutdown);

    loop {
        let (stream, peer) = tokio::select! {
            _ = &mut shutdown => break,
            accepted = listener.accept() => match accepted {
                Ok(conn) => conn,
                Err(err) => {
                    warn!(error = %err, "Failed to accept connection");
                    tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                    continue;
                }
            },
        };

        let io = TokioIo::new(stream);
        let ctx = Arc::clone(&ctx);
        let guard = tracker.track();

        tokio::task::spawn(async move {
            let _guard = guard;
            let service = service_fn(move |req| {
                request_handler::handle_request(req, peer, Arc::clone(&ctx))
            });

            if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                debug!(peer = %peer, error = %err, "Connection error");
            }
        });
    }

    tracker
}

/// Print startup banner with configuration
pub fn print_startup_info(args: &Args, config: &EnvVarConfig, addr: SocketAddr) {
    let url = format!("http://localhost:{}", config.port);

    if args.quiet {
        // Quiet mode: only essential information
        println!(
            "🚀 FrontGate v{} serving on {}",
            env!("CARGO_PKG_VERSION"),
            url
        );
        return;
    }

    let rate_config = config.rate_limit_config();
    let static_config = config.static_config();

    println!("🌐 {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    println!("   {}", env!("CARGO_PKG_DESCRIPTION"));
    println!();
    println!("📡 Network Configuration:");
    println!("   Listening:      {addr}");
    println!("   Frontend:       {url}");
    println!("   Backend API:    {}", defaults::BACKEND_API_URL);
    println!();
    println!("📁 Static Content:");
    println!("   Bundle Root:    {}", static_config.bundle_root.display());
    println!("   Cache Size:     {} files", static_config.cache_max_size);
    println!(
        "   Gzip:           {}",
        if config.gzip_enabled() { "enabled" } else { "disabled" }
    );
    println!();
    println!("⚡ Rate Limiting:");
    println!(
        "   Max Requests:   {} per {} seconds",
        rate_config.max_requests,
        rate_config.window_duration.as_secs()
    );
    let cleanup = config.rate_limit_cleanup_config();
    if cleanup.is_enabled() {
        println!(
            "   Cleanup:        above {} clients, every {} seconds",
            cleanup.threshold,
            cleanup.interval.as_secs()
        );
    }
    println!();
    println!("🔌 API Endpoints:");
    println!("   Health check:   {url}/api/health");
    println!("   Statistics:     {url}/api/stats");
    println!("   Mock data:      {url}/api/mock-data");
    println!();
    println!("📝 Logging:");
    println!("   Level:          {}", logging::default_directive(config.debug));
    println!(
        "   File:           {}",
        logging::log_file_pattern(&config.log_dir).display()
    );

    if args.verbose || config.debug {
        print_env_config();
    }

    println!();
    println!("🚀 Server starting... (Ctrl+C to stop)");
}

/// Print environment variable configuration status (used in verbose mode)
fn print_env_config() {
    println!();
    println!("🔧 Environment Variables:");

    for &var_name in env_vars::all_env_vars() {
        match std::env::var(var_name) {
            Ok(value) => println!("   {:<29} = {}", var_name, value),
            Err(_) => println!("   {:<29} = [NOT SET]", var_name),
        }
    }
}

/// Print final statistics after shutdown.
pub fn print_shutdown_summary(snapshot: &MetricsSnapshot) {
    println!();
    println!("📊 Final statistics:");
    println!("   Total requests:     {}", snapshot.total_requests);
    println!("   Uptime:             {:.1} seconds", snapshot.uptime_seconds);
    println!(
        "   Avg response time:  {:.2} ms",
        snapshot.avg_response_time * 1000.0
    );
    if !snapshot.requests_by_endpoint.is_empty() {
        println!("   Requests by endpoint:");
        for (endpoint, count) in &snapshot.requests_by_endpoint {
            println!("     {:<30} {}", endpoint, count);
        }
    }
    println!("👋 FrontGate stopped");
}

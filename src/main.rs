use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};

use frontgate::args::Args;
use frontgate::{FrontGateError, ServerContext, config, logging, server};
use frontgate_core::StaticContentProvider;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Validate arguments
    if let Err(err) = args.validate() {
        eprintln!("❌ Configuration error: {err}");
        std::process::exit(1);
    }

    // Logger first, so that configuration warnings are recorded
    let (log_dir, debug) = config::logging_settings_from_env();
    let _log_guard = match logging::init(&log_dir, debug, args.json_logs) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("❌ {err}");
            std::process::exit(1);
        }
    };

    let mut config = config::get_config().clone();
    if let Some(port) = args.port {
        config = config.with_port(port);
    }
    if let Some(dir) = &args.frontend_dir {
        config = config.with_frontend_dir(dir.clone());
    }

    prepare_bundle_root(&config);

    let bind_ip: std::net::IpAddr = match args.bind.parse() {
        Ok(ip) => ip,
        Err(_) => {
            eprintln!("❌ Invalid bind address: '{}'", args.bind);
            std::process::exit(1);
        }
    };
    let bind_addr = SocketAddr::from((bind_ip, config.port));

    let listener = match server::bind(bind_addr).await {
        Ok(listener) => listener,
        Err(FrontGateError::PortInUse(port)) => {
            error!(port, "Port already in use");
            eprintln!("❌ Port {port} is already in use");
            eprintln!("   Stop the other process or pick another port, e.g.:");
            eprintln!("   frontgate {}", port.saturating_add(1));
            std::process::exit(1);
        }
        Err(err) => {
            error!(error = %err, "Failed to start server");
            eprintln!("❌ {err}");
            std::process::exit(1);
        }
    };

    server::print_startup_info(&args, &config, bind_addr);
    info!(addr = %bind_addr, "FrontGate listening");

    let ctx = Arc::new(ServerContext::new(config));
    let tracker = server::run(listener, Arc::clone(&ctx), async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    })
    .await;

    println!();
    println!("🛑 Shutting down, waiting for {} connection(s)...", tracker.count());
    if !tracker.wait_for_shutdown(server::SHUTDOWN_TIMEOUT).await {
        warn!(
            remaining = tracker.count(),
            "Shutdown timeout reached, closing remaining connections"
        );
    }

    let snapshot = ctx.metrics().snapshot().await;
    info!(
        total_requests = snapshot.total_requests,
        uptime_seconds = snapshot.uptime_seconds,
        "FrontGate stopped"
    );
    server::print_shutdown_summary(&snapshot);
}

/// Creates the bundle root if needed and warns when there is nothing to serve.
fn prepare_bundle_root(config: &frontgate::EnvVarConfig) {
    let static_config = config.static_config();

    if let Err(err) = std::fs::create_dir_all(&static_config.bundle_root) {
        warn!(
            dir = %static_config.bundle_root.display(),
            error = %err,
            "Cannot create frontend directory"
        );
        return;
    }

    if !static_config.index_path().is_file() {
        warn!(
            path = %static_config.index_path().display(),
            "index.html not found, build the frontend first"
        );
    }
}

//! Receipt rewards HTTP server.
//!
//! Accepts purchase receipts, scores them with the rule engine, and keeps an
//! in-memory map from assigned id to point total for later lookup.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use receipt_rewards::http::{create_app, AppState};
use receipt_rewards::Config;

#[derive(Parser, Debug)]
#[command(name = "receipt-rewards-server")]
#[command(about = "HTTP service that scores purchase receipts into reward points")]
#[command(version)]
struct Args {
    /// Server configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Server bind address (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Server bind port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(&args.log_level);
    info!("Starting receipt rewards server v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&args)?;
    config.validate().context("invalid configuration")?;

    let bind_addr = SocketAddr::new(
        config.server.host.parse().context("invalid server.host")?,
        config.server.port,
    );

    let state = AppState::new(config);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", bind_addr))?;

    info!("Receipt rewards server is running at http://{}", bind_addr);
    info!("Health check available at: http://{}/health", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("receipt_rewards={},tower_http=debug", level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = if args.config.exists() {
        info!("Loading configuration from: {}", args.config.display());
        Config::from_file(&args.config)?
    } else {
        warn!(
            "No config file at {}, using default configuration",
            args.config.display()
        );
        Config::default()
    };

    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    Ok(config)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully");
        },
    }
}

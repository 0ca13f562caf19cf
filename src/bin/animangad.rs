//! animangad: Animanga daemon.
//!
//! Serves the [`Catalog`](animanga::Catalog) as a JSON REST API, so every
//! client shares one rate gate and one response cache.

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use animanga::server::config::Config;

/// Animanga daemon, a cached Jikan catalog service.
#[derive(Parser)]
#[command(name = "animangad")]
#[command(version = animanga::PKG_VERSION)]
#[command(about = "Animanga catalog gateway daemon")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long, env = "ANIMANGA_CONFIG")]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing (default: info for the daemon; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // Load configuration
    let config = Config::load(args.config.as_deref())?;
    let gateway = config.gateway_builder().build()?;

    let port = std::env::var("PORT").ok();
    let addr = config.bind_address(port.as_deref())?;

    info!(
        version = animanga::PKG_VERSION,
        upstream = gateway.base_url(),
        transport = gateway.rate_gate().transport_name(),
        "animangad starting"
    );

    animanga::server::serve(Arc::new(gateway), addr).await?;

    Ok(())
}

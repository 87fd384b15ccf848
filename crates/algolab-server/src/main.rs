//! Binary entry point for the playground server
//!
//! Hosts the execution core behind the HTTP API. The binary only wires
//! configuration together: sandbox limits come from flags, everything else
//! is handled by the server library and the core.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use algolab_core::{Runner, SandboxConfig};
use algolab_server::{shutdown_signal, PlaygroundServer, ServerConfig};

#[derive(Parser, Debug)]
#[clap(author, version, about = "algolab server - sandboxed script playground API")]
struct Cli {
    #[clap(long, default_value = "127.0.0.1:3001")]
    bind_addr: String,

    #[clap(long, short, default_value = "info")]
    log_level: String,

    #[clap(
        long,
        default_value_t = 1000,
        help = "Wall-clock deadline for a single script run, in milliseconds"
    )]
    timeout_ms: u64,

    #[clap(long, help = "Disable permissive CORS headers")]
    no_cors: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    let log_level_filter = cli.log_level.parse().unwrap_or(LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .init();

    let bind_socket_addr: SocketAddr = cli
        .bind_addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address '{}': {}", cli.bind_addr, e))?;

    let sandbox_config = SandboxConfig {
        timeout: Duration::from_millis(cli.timeout_ms),
        ..SandboxConfig::default()
    };
    let server_config = ServerConfig::default()
        .with_bind_addr(bind_socket_addr)
        .with_cors(!cli.no_cors);

    log::info!(
        "Starting algolab server on {} (script deadline {} ms)...",
        bind_socket_addr,
        cli.timeout_ms
    );

    let server = PlaygroundServer::with_config(Runner::with_config(sandbox_config), server_config);

    if let Err(e) = server.serve_with_shutdown(shutdown_signal()).await {
        log::error!("Server failed: {}", e);
        return Err(e.into());
    }

    log::info!("algolab server shut down gracefully.");
    Ok(())
}

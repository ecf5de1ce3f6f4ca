use anyhow::{Context, Result};
use clap::Parser;
use tax_api::{app::build_state, build_router, config::Cli, logging::init_logging};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level, cli.log_file.as_deref())?;

    let provider = cli.provider_config();
    let state = build_state(&provider)
        .await
        .with_context(|| format!("Failed to set up '{}' bracket provider", provider.backend))?;

    let app = build_router(state, cli.request_timeout());

    let addr = cli.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(env = %cli.env, "starting {} server on {}", cli.env, addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => warn!(error = %e, "failed to listen for shutdown signal"),
    }
}

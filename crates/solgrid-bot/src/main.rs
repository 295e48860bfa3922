//! solgrid market-making bot - entry point.

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Grid market-making bot for a token on a Solana DEX.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via SOLGRID_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    solgrid_telemetry::init_logging()?;

    info!("Starting solgrid bot v{}", env!("CARGO_PKG_VERSION"));

    // Config path: CLI arg > SOLGRID_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("SOLGRID_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    info!(config_path = %config_path, "Loading configuration");
    let config = solgrid_bot::AppConfig::from_file_or_default(&config_path)?;
    info!(?config.run_mode, pair = %config.strategy.pair, "Configuration loaded");

    if !config.is_paper_mode() {
        anyhow::bail!("live mode requires a chain transport; only paper mode is wired");
    }

    let app = solgrid_bot::App::paper(config)?;

    let token = app.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received, shutting down");
            token.cancel();
        }
    });

    app.run().await?;
    Ok(())
}

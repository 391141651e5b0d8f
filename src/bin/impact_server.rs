

use clap::Parser;
use refactoring_impact::ImpactConfig;
use refactoring_impact::server::{AppState, serve};
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Serves parsed commit-technique and metrics datasets over HTTP.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, env = "IMPACT_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to bind
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory holding the `commits/` and `metrics/` CSV folders
    #[arg(short, long)]
    data_root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::from_default_env()
                .add_directive("refactoring_impact=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let mut config = ImpactConfig::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(root) = args.data_root {
        config.data_root = root;
    }

    info!("Serving datasets from {}", config.data_root.display());
    let listener = TcpListener::bind(config.bind_addr()).await?;
    serve(listener, AppState::from_config(&config)).await?;
    Ok(())
}



use clap::Parser;
use refactoring_impact::{Dashboard, DatasetSource, FsDatasetStore, ImpactConfig, RetrievalClient};
use refactoring_impact::parsers::MeasuresOptions;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Reports how refactoring commits moved complexity and size metrics.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Dataset to fetch; repeat to fetch several in turn
    #[arg(short, long = "dataset", required = true)]
    datasets: Vec<String>,

    /// Base URL of an impact-server
    #[arg(short, long, conflicts_with = "local")]
    server: Option<String>,

    /// Read datasets straight from this data root instead of a server
    #[arg(short, long)]
    local: Option<PathBuf>,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, env = "IMPACT_CONFIG")]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// List every `before -> after` pair under each metric
    #[arg(long)]
    transitions: bool,
}

fn build_source(args: &Args, config: &ImpactConfig) -> anyhow::Result<Arc<dyn DatasetSource>> {
    if let Some(root) = &args.local {
        let options = MeasuresOptions {
            reject_duplicates: config.reject_duplicate_snapshots,
        };
        return Ok(Arc::new(FsDatasetStore::new(root).with_measures_options(options)));
    }

    let mut config = config.clone();
    if let Some(url) = &args.server {
        config.server_url = Some(url.clone());
    }
    Ok(Arc::new(RetrievalClient::from_config(&config)?))
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
    let config = ImpactConfig::load(args.config.as_deref())?;
    let dashboard = Dashboard::new(build_source(&args, &config)?, config.techniques.clone());

    for dataset in &args.datasets {
        dashboard.refresh(dataset).await;

        match dashboard.report() {
            Some(report) if args.json => println!("{}", serde_json::to_string_pretty(&report)?),
            Some(report) => println!("{}", report.render(args.transitions)),
            None => eprintln!("No dataset loaded yet"),
        }
    }

    Ok(())
}

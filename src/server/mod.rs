
mod handlers;

use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::core::config::ImpactConfig;
use crate::core::error::Result;
use crate::parsers::MeasuresOptions;
use crate::store::FsDatasetStore;

pub use handlers::ErrorBody;


pub const COMMITS_ROUTE: &str = "/api/commits";

pub const METRICS_ROUTE: &str = "/api/metrics";


#[derive(Clone)]
pub struct AppState {
    store: Arc<FsDatasetStore>,
}

impl AppState {
    pub fn new(store: FsDatasetStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn from_config(config: &ImpactConfig) -> Self {
        let options = MeasuresOptions {
            reject_duplicates: config.reject_duplicate_snapshots,
        };
        Self::new(FsDatasetStore::new(&config.data_root).with_measures_options(options))
    }
}


pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz_handler))
        .route(COMMITS_ROUTE, get(handlers::commits_handler))
        .route(METRICS_ROUTE, get(handlers::metrics_handler))
        .with_state(state)
}


/// Serves the dataset endpoints until Ctrl-C.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    let addr = listener.local_addr()?;
    info!("impact-server listening on {}", addr);
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;
    Ok(())
}

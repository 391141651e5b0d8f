use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{error, info, warn};

use super::AppState;
use crate::core::error::ImpactError;


const DATASET_PARAM: &str = "filename";


/// Body of every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

struct ApiError(ImpactError);

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            ImpactError::MissingInput | ImpactError::InvalidDatasetName(_) => StatusCode::BAD_REQUEST,
            ImpactError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ImpactError> for ApiError {
    fn from(err: ImpactError) -> Self {
        Self(err)
    }
}

fn dataset_name(params: &HashMap<String, String>) -> &str {
    params.get(DATASET_PARAM).map(String::as_str).unwrap_or_default()
}

fn log_outcome<T>(route: &str, dataset: &str, started: Instant, result: &Result<T, ApiError>) {
    let elapsed_ms = started.elapsed().as_millis() as u64;
    match result {
        Ok(_) => info!(route = route, dataset = dataset, elapsed_ms = elapsed_ms, "request served"),
        Err(e) if e.0.is_client_error() || matches!(e.0, ImpactError::NotFound(_)) => {
            warn!(route = route, dataset = dataset, elapsed_ms = elapsed_ms, error = %e.0, "request rejected")
        }
        Err(e) => error!(route = route, dataset = dataset, elapsed_ms = elapsed_ms, error = %e.0, "request failed"),
    }
}


pub(super) async fn healthz_handler() -> &'static str {
    "ok"
}


pub(super) async fn commits_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let started = Instant::now();
    let dataset = dataset_name(&params);
    let result = state.store.read_commits(dataset).await.map_err(ApiError::from);
    log_outcome(super::COMMITS_ROUTE, dataset, started, &result);
    match result {
        Ok(commits) => Json(commits).into_response(),
        Err(e) => e.into_response(),
    }
}


pub(super) async fn metrics_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let started = Instant::now();
    let dataset = dataset_name(&params);
    let result = state.store.read_measures(dataset).await.map_err(ApiError::from);
    log_outcome(super::METRICS_ROUTE, dataset, started, &result);
    match result {
        Ok(measures) => Json(measures).into_response(),
        Err(e) => e.into_response(),
    }
}



use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use super::base::{DatasetSource, RetrievalError};
use crate::core::config::ImpactConfig;
use crate::core::models::{CommitMeasures, CommitTechniques};
use crate::server::{COMMITS_ROUTE, ErrorBody, METRICS_ROUTE};


/// Fetches parsed datasets from an `impact-server`.
#[derive(Debug, Clone)]
pub struct RetrievalClient {
    base_url: Url,
    client: Client,
}

impl RetrievalClient {

    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RetrievalError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| RetrievalError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        let client = Client::builder().timeout(timeout).build()?;
        info!("Retrieval client targeting {}", base_url);
        Ok(Self { base_url, client })
    }


    pub fn from_config(config: &ImpactConfig) -> Result<Self, RetrievalError> {
        Self::new(&config.base_url(), Duration::from_secs(config.timeout_secs))
    }


    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get_dataset<T: DeserializeOwned>(&self, route: &str, dataset: &str) -> Result<T, RetrievalError> {
        if dataset.is_empty() {
            return Err(RetrievalError::MissingInput);
        }
        let url = self
            .base_url
            .join(route)
            .map_err(|e| RetrievalError::InvalidUrl(e.to_string()))?;

        debug!("GET {} (dataset={})", url, dataset);
        let response = self
            .client
            .get(url)
            .query(&[("filename", dataset)])
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::NOT_FOUND => return Err(RetrievalError::NotFound(dataset.to_string())),
            StatusCode::BAD_REQUEST => return Err(RetrievalError::InvalidDatasetName(dataset.to_string())),
            _ if !status.is_success() => {
                let message = match response.json::<ErrorBody>().await {
                    Ok(body) => body.message,
                    Err(_) => status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string(),
                };
                return Err(RetrievalError::Upstream {
                    status: status.as_u16(),
                    message,
                });
            }
            _ => {}
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl DatasetSource for RetrievalClient {
    async fn commits(&self, dataset: &str) -> Result<CommitTechniques, RetrievalError> {
        self.get_dataset(COMMITS_ROUTE, dataset).await
    }

    async fn measures(&self, dataset: &str) -> Result<CommitMeasures, RetrievalError> {
        self.get_dataset(METRICS_ROUTE, dataset).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = RetrievalClient::new("http://localhost:3000", Duration::from_secs(5));
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_url() {
        let err = RetrievalClient::new("not a url", Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, RetrievalError::InvalidUrl(_)));
    }

    #[test]
    fn test_from_config() {
        let client = RetrievalClient::from_config(&ImpactConfig::default()).unwrap();
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:3000/");
    }

    #[tokio::test]
    async fn test_empty_dataset_never_hits_network() {
        let client = RetrievalClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        assert!(matches!(client.commits("").await, Err(RetrievalError::MissingInput)));
        assert!(matches!(client.measures("").await, Err(RetrievalError::MissingInput)));
    }
}

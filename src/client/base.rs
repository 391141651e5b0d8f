

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::core::error::ImpactError;
use crate::core::models::{CommitMeasures, CommitTechniques, DatasetSnapshot};


#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Please, provide a valid source")]
    MissingInput,

    #[error("Invalid dataset name: {0}")]
    InvalidDatasetName(String),

    #[error("Dataset not found: {0}")]
    NotFound(String),

    #[error("Upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    #[error("Dataset source failed: {0}")]
    Source(String),
}

impl RetrievalError {
    /// Human-readable reason, without the transport framing.
    pub fn message(&self) -> String {
        match self {
            Self::Upstream { message, .. } => message.clone(),
            Self::Source(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<ImpactError> for RetrievalError {
    fn from(err: ImpactError) -> Self {
        match err {
            ImpactError::MissingInput => Self::MissingInput,
            ImpactError::InvalidDatasetName(name) => Self::InvalidDatasetName(name),
            ImpactError::NotFound(name) => Self::NotFound(name),
            other => Self::Source(other.to_string()),
        }
    }
}


/// Anything that can hand out the parsed technique map and measures of a dataset.
#[async_trait]
pub trait DatasetSource: Send + Sync {

    async fn commits(&self, dataset: &str) -> Result<CommitTechniques, RetrievalError>;


    async fn measures(&self, dataset: &str) -> Result<CommitMeasures, RetrievalError>;

    /// Both halves of a dataset, requested concurrently.
    async fn fetch(&self, dataset: &str) -> Result<DatasetSnapshot, RetrievalError> {
        if dataset.is_empty() {
            return Err(RetrievalError::MissingInput);
        }
        let (commits, measures) =
            futures::future::try_join(self.commits(dataset), self.measures(dataset)).await?;
        Ok(DatasetSnapshot::new(dataset, commits, measures))
    }
}


#[async_trait]
impl DatasetSource for Arc<dyn DatasetSource> {
    async fn commits(&self, dataset: &str) -> Result<CommitTechniques, RetrievalError> {
        (**self).commits(dataset).await
    }

    async fn measures(&self, dataset: &str) -> Result<CommitMeasures, RetrievalError> {
        (**self).measures(dataset).await
    }

    async fn fetch(&self, dataset: &str) -> Result<DatasetSnapshot, RetrievalError> {
        (**self).fetch(dataset).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ParseError;

    #[test]
    fn test_from_impact_error() {
        assert!(matches!(RetrievalError::from(ImpactError::MissingInput), RetrievalError::MissingInput));
        assert!(matches!(
            RetrievalError::from(ImpactError::NotFound("demo".into())),
            RetrievalError::NotFound(name) if name == "demo"
        ));
        assert!(matches!(
            RetrievalError::from(ImpactError::InvalidDatasetName("../x".into())),
            RetrievalError::InvalidDatasetName(name) if name == "../x"
        ));

        let parse = ImpactError::Parse(ParseError::InvalidNumber {
            line: 4,
            field: "lines",
            value: "x".into(),
        });
        let err = RetrievalError::from(parse);
        assert!(err.message().contains("line 4"));
    }

    #[test]
    fn test_upstream_message() {
        let err = RetrievalError::Upstream {
            status: 404,
            message: "Dataset not found: demo".into(),
        };
        assert_eq!(err.message(), "Dataset not found: demo");
        assert!(err.to_string().contains("404"));
    }
}

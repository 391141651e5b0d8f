use async_trait::async_trait;

use super::base::{DatasetSource, RetrievalError};
use crate::core::models::{CommitMeasures, CommitTechniques};
use crate::store::FsDatasetStore;


#[async_trait]
impl DatasetSource for FsDatasetStore {
    async fn commits(&self, dataset: &str) -> Result<CommitTechniques, RetrievalError> {
        Ok(self.read_commits(dataset).await?)
    }

    async fn measures(&self, dataset: &str) -> Result<CommitMeasures, RetrievalError> {
        Ok(self.read_measures(dataset).await?)
    }
}

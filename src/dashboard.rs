

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::client::{DatasetSource, RetrievalError};
use crate::core::models::DatasetSnapshot;
use crate::toolkit::{DashboardReport, TechniquePolicy};


/// Holds the most recently fetched dataset and turns it into reports.
///
/// A new fetch replaces the previous result. A failed fetch is logged and
/// leaves whatever was loaded before in place.
pub struct Dashboard<S: DatasetSource> {
    source: S,
    policy: TechniquePolicy,
    current: RwLock<Option<DatasetSnapshot>>,
}

impl<S: DatasetSource> Dashboard<S> {

    pub fn new(source: S, policy: TechniquePolicy) -> Self {
        Self {
            source,
            policy,
            current: RwLock::new(None),
        }
    }


    pub fn policy(&self) -> &TechniquePolicy {
        &self.policy
    }


    pub async fn load(&self, dataset: &str) -> Result<(), RetrievalError> {
        let snapshot = self.source.fetch(dataset).await?;
        info!(
            "Loaded dataset {} ({} commits, {} measures)",
            dataset,
            snapshot.commits.len(),
            snapshot.measures.len()
        );
        *self.current.write() = Some(snapshot);
        Ok(())
    }

    /// Like [`Dashboard::load`], but never fails: returns whether new data was loaded.
    pub async fn refresh(&self, dataset: &str) -> bool {
        match self.load(dataset).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to load dataset {:?}: {}", dataset, e.message());
                false
            }
        }
    }


    pub fn current_dataset(&self) -> Option<String> {
        self.current.read().as_ref().map(|s| s.dataset.clone())
    }


    pub fn report(&self) -> Option<DashboardReport> {
        self.current
            .read()
            .as_ref()
            .map(|snapshot| DashboardReport::build(snapshot, &self.policy))
    }
}

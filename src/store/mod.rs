

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::core::error::{ImpactError, Result};
use crate::core::models::{CommitMeasures, CommitTechniques};
use crate::parsers::{MeasuresOptions, parse_measures, parse_techniques};


const COMMITS_DIR: &str = "commits";

const METRICS_DIR: &str = "metrics";

const EXTENSION: &str = "csv";


/// Resolves dataset names to CSV files below a data root.
///
/// `<root>/commits/<name>.csv` holds the technique map and
/// `<root>/metrics/<name>.csv` the before/after measures.
#[derive(Debug, Clone)]
pub struct FsDatasetStore {
    root: PathBuf,
    measures_options: MeasuresOptions,
}

impl FsDatasetStore {

    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        info!("Dataset store rooted at {}", root.display());
        Self {
            root,
            measures_options: MeasuresOptions::default(),
        }
    }


    #[must_use]
    pub fn with_measures_options(mut self, options: MeasuresOptions) -> Self {
        self.measures_options = options;
        self
    }


    pub fn root(&self) -> &Path {
        &self.root
    }


    pub fn commits_path(&self, name: &str) -> Result<PathBuf> {
        self.dataset_path(COMMITS_DIR, name)
    }


    pub fn measures_path(&self, name: &str) -> Result<PathBuf> {
        self.dataset_path(METRICS_DIR, name)
    }


    pub async fn read_commits(&self, name: &str) -> Result<CommitTechniques> {
        let text = self.read_source(&self.commits_path(name)?, name).await?;
        Ok(parse_techniques(&text))
    }


    pub async fn read_measures(&self, name: &str) -> Result<CommitMeasures> {
        let text = self.read_source(&self.measures_path(name)?, name).await?;
        Ok(parse_measures(&text, self.measures_options)?)
    }

    fn dataset_path(&self, dir: &str, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.root.join(dir).join(format!("{}.{}", name, EXTENSION)))
    }

    async fn read_source(&self, path: &Path, name: &str) -> Result<String> {
        debug!("Reading {}", path.display());
        match tokio::fs::read_to_string(path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ImpactError::NotFound(name.to_string())),
            Err(e) => Err(ImpactError::Io(e)),
        }
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ImpactError::MissingInput);
    }
    if name == "." || name.contains("..") || name.contains(['/', '\\', '\0']) {
        return Err(ImpactError::InvalidDatasetName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ParseError;

    fn store_with(files: &[(&str, &str, &str)]) -> (tempfile::TempDir, FsDatasetStore) {
        let dir = tempfile::tempdir().unwrap();
        for (sub, name, body) in files {
            let sub_dir = dir.path().join(sub);
            std::fs::create_dir_all(&sub_dir).unwrap();
            std::fs::write(sub_dir.join(format!("{}.csv", name)), body).unwrap();
        }
        let store = FsDatasetStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_paths() {
        let store = FsDatasetStore::new("/data");
        assert_eq!(store.commits_path("jfreechart").unwrap(), PathBuf::from("/data/commits/jfreechart.csv"));
        assert_eq!(store.measures_path("jfreechart").unwrap(), PathBuf::from("/data/metrics/jfreechart.csv"));
    }

    #[test]
    fn test_name_validation() {
        let store = FsDatasetStore::new("/data");
        assert!(matches!(store.commits_path(""), Err(ImpactError::MissingInput)));
        for bad in ["../etc/passwd", "a/b", "a\\b", ".."] {
            assert!(matches!(store.commits_path(bad), Err(ImpactError::InvalidDatasetName(_))), "{}", bad);
        }
    }

    #[tokio::test]
    async fn test_read_dataset() {
        let (_dir, store) = store_with(&[
            ("commits", "demo", "c1,MOVE\nc1,RENAME\n"),
            ("metrics", "demo", "isAfterCommit;commitId;comment_lines;complexity;lines;statements\nfalse;c1;2;5;40;10\n"),
        ]);
        let commits = store.read_commits("demo").await.unwrap();
        assert_eq!(commits["c1"].len(), 2);
        let measures = store.read_measures("demo").await.unwrap();
        assert!(measures["c1"].before.is_some());
    }

    #[tokio::test]
    async fn test_missing_dataset() {
        let (_dir, store) = store_with(&[]);
        assert!(matches!(store.read_commits("nope").await, Err(ImpactError::NotFound(name)) if name == "nope"));
        assert!(matches!(store.read_measures("nope").await, Err(ImpactError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_parse_error_propagates() {
        let (_dir, store) = store_with(&[("metrics", "bad", "false;c1;2;abc;40;10\n")]);
        let err = store.read_measures("bad").await.unwrap_err();
        assert!(matches!(err, ImpactError::Parse(ParseError::InvalidNumber { line: 1, .. })));
    }

    #[tokio::test]
    async fn test_strict_store_rejects_duplicates() {
        let (_dir, store) = store_with(&[("metrics", "dup", "true;c1;1;1;1;1\ntrue;c1;1;1;1;1\n")]);
        assert!(store.read_measures("dup").await.is_ok());

        let strict = store.with_measures_options(MeasuresOptions::strict());
        let err = strict.read_measures("dup").await.unwrap_err();
        assert!(matches!(err, ImpactError::Parse(ParseError::DuplicateSnapshot { .. })));
    }
}

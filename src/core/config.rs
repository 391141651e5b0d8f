

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::error::Result;
use crate::toolkit::classifier::TechniquePolicy;


const ENV_PREFIX: &str = "IMPACT";


#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactConfig {

    pub host: String,
    pub port: u16,
    pub data_root: PathBuf,


    /// Explicit dashboard target; derived from `host` and `port` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
    pub timeout_secs: u64,


    pub reject_duplicate_snapshots: bool,
    pub techniques: TechniquePolicy,
}

impl ImpactConfig {

    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
            data_root: PathBuf::from(crate::DEFAULT_DATA_ROOT),

            server_url: None,
            timeout_secs: crate::DEFAULT_TIMEOUT_SECS,

            reject_duplicate_snapshots: false,
            techniques: TechniquePolicy::default(),
        }
    }


    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }


    pub fn base_url(&self) -> String {
        self.server_url
            .clone()
            .unwrap_or_else(|| format!("http://{}:{}", self.host, self.port))
    }


    /// Defaults, then the optional file, then `IMPACT_*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::layered(path, config::Environment::with_prefix(ENV_PREFIX))
    }

    fn layered(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let defaults = config::Config::try_from(&Self::default())?;
        let mut builder = config::Config::builder().add_source(defaults);

        if let Some(path) = path {
            debug!("Loading configuration from {}", path.display());
            builder = builder.add_source(config::File::from(path));
        }

        let config = builder
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize::<Self>()?;

        Ok(config)
    }
}

impl Default for ImpactConfig {
    fn default() -> Self {
        Self::new(crate::DEFAULT_HOST, crate::DEFAULT_PORT)
    }
}



pub mod client;
pub mod core;
pub mod dashboard;
pub mod parsers;
pub mod server;
pub mod store;
pub mod toolkit;


pub use client::{DatasetSource, RetrievalClient, RetrievalError};
pub use self::core::config::ImpactConfig;
pub use self::core::error::{ImpactError, ParseError, Result};
pub use self::core::models::{
    CommitMeasure, CommitMeasures, CommitTechniques, DatasetSnapshot, MetricField, Metrics,
    QualityAttribute,
};
pub use dashboard::Dashboard;
pub use store::FsDatasetStore;
pub use toolkit::{Balance, DashboardReport, MetricDelta, Percentages, TechniquePolicy};


pub const DEFAULT_HOST: &str = "127.0.0.1";


pub const DEFAULT_PORT: u16 = 3000;


pub const DEFAULT_DATA_ROOT: &str = "source";


pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

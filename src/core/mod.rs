

pub mod config;
pub mod error;
pub mod models;

pub use config::ImpactConfig;
pub use error::{ImpactError, ParseError, Result};


pub mod base;
pub mod http;
mod local;

pub use base::{DatasetSource, RetrievalError};
pub use http::RetrievalClient;

pub mod config;
pub mod dataset;
pub mod error;
pub mod prepare;
pub mod process;
pub mod schema;

#[cfg(test)]
pub(crate) mod fixtures;

pub use config::PipelineConfig;
pub use dataset::{Dataset, ExtractData, Record};
pub use error::{DatasetError, Result};
pub use prepare::ModelView;
pub use process::score::Segment;

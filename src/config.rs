use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::Result;

/// Environment variable naming an optional YAML config file.
pub const CONFIG_ENV: &str = "CSS_DATASET_CONFIG";

/// Where the pipeline reads its report and writes its outputs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub input_report: PathBuf,
    pub output_csv: PathBuf,
    /// Columnar copy of the dataset; skipped when unset.
    pub output_parquet: Option<PathBuf>,
    /// Reload the written CSV and compare it with the extracted table.
    pub verify_round_trip: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            input_report: PathBuf::from("input_file.txt"),
            output_csv: PathBuf::from("dataset.csv"),
            output_parquet: None,
            verify_round_trip: true,
        }
    }
}

impl PipelineConfig {
    /// Read a YAML config. Missing keys keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Config from `$CSS_DATASET_CONFIG` if set, else defaults.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(PathBuf::from(path)),
            None => Ok(Self::default()),
        }
    }
}

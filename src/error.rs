use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    /// A token or cell could not be read as the type its position demands.
    #[error("format error on line {line}: {message} (in `{content}`)")]
    Format {
        line: usize,
        content: String,
        message: String,
    },

    /// A loaded table row does not have the expected width.
    #[error("schema error on row {row}: found {found} fields, expected {expected}")]
    Schema {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("config error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl DatasetError {
    pub fn format(line: usize, content: impl Into<String>, message: impl Into<String>) -> Self {
        DatasetError::Format {
            line,
            content: content.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DatasetError>;

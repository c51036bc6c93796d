use crate::calc::CalculationError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KuotaCalcError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("reading {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("decoding yaml data (document at line {line}): {source}")]
    Decode {
        line: usize,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("decoding yaml data (document at line {line}): missing field `{field}`")]
    MissingTypeMeta { line: usize, field: &'static str },

    #[error(transparent)]
    Calculation(#[from] CalculationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{failed} of {total} documents could not be calculated")]
    Incomplete { failed: usize, total: usize },
}

impl KuotaCalcError {
    /// Whether this is the "resource not supported" condition, which callers
    /// usually skip instead of aborting.
    pub fn is_not_supported(&self) -> bool {
        matches!(self, KuotaCalcError::Calculation(e) if e.is_not_supported())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, KuotaCalcError>;

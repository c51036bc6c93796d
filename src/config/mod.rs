pub mod types;

use crate::error::{ConfigError, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

pub use types::{CalculationConfig, Config, OutputConfig};

const CONFIG_FILE_NAME: &str = ".kuota-calc.toml";

/// Get the global config file path (~/.kuota-calc.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Get the local config file path (./.kuota-calc.toml)
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}

/// Load configuration from file or use defaults.
///
/// An explicit path must exist and parse. Otherwise the local config is
/// checked first, then the global one. A broken implicit config file is an
/// error too, so typos do not go unnoticed.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    let candidates = std::env::current_dir()
        .ok()
        .map(|dir| local_config_path(&dir))
        .into_iter()
        .chain(global_config_path());

    for path in candidates {
        if path.is_file() {
            return read_config(&path);
        }
    }

    debug!("no {CONFIG_FILE_NAME} found, using defaults");
    Ok(Config::default())
}

/// Read and parse a single config file.
pub fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("loaded configuration from {}", path.display());
    Ok(config)
}

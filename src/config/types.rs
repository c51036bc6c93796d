use crate::formatter::OutputFormat;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub calculation: CalculationConfig,
    pub output: OutputConfig,
}

/// How the totals are calculated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationConfig {
    /// Maximum number of simultaneous rollouts. Negative means unlimited.
    pub max_rollouts: i64,
    /// Continue with the remaining documents after a calculation error.
    pub keep_going: bool,
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            max_rollouts: -1,
            keep_going: false,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub detailed: bool,
    pub format: OutputFormat,
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            detailed: false,
            format: OutputFormat::Table,
            color: true,
        }
    }
}

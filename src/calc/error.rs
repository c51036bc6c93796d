//! Errors raised while calculating the resource usage of a workload.

use super::quantity::ParseQuantityError;
use thiserror::Error;

/// Why the resource usage of a single workload could not be calculated.
#[derive(Debug, Error)]
pub enum CalcError {
    /// The object's apiVersion/kind is not one of the supported workload kinds.
    #[error("resource not supported")]
    NotSupported,

    /// The update strategy type is none of the kind's recognized variants.
    #[error("{kind} {name}: strategy {strategy:?} is unknown")]
    UnknownStrategy {
        kind: &'static str,
        name: String,
        strategy: String,
    },

    /// A replica count derived from the strategy does not fit into 32 bits.
    #[error("{field} out of int32 boundaries")]
    Overflow { field: &'static str },

    /// A strategy field holds a string that is not a percentage.
    #[error("invalid value for IntOrString: {0:?} is not a percentage")]
    InvalidIntOrPercent(String),

    /// A container declares a request or limit that is not a valid quantity.
    #[error("invalid {resource} quantity: {source}")]
    InvalidQuantity {
        resource: String,
        #[source]
        source: ParseQuantityError,
    },
}

/// A [`CalcError`] attributed to the apiVersion/kind of the document that caused it.
#[derive(Debug, Error)]
#[error("calculating {version}/{kind} resource usage: {source}")]
pub struct CalculationError {
    pub version: String,
    pub kind: String,
    source: CalcError,
}

impl CalculationError {
    pub fn new(version: impl Into<String>, kind: impl Into<String>, source: CalcError) -> Self {
        Self {
            version: version.into(),
            kind: kind.into(),
            source,
        }
    }

    /// The "resource not supported" condition for an unrecognized apiVersion/kind.
    pub fn not_supported(version: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::new(version, kind, CalcError::NotSupported)
    }

    /// Whether the document was skipped because its kind is not supported.
    pub fn is_not_supported(&self) -> bool {
        matches!(self.source, CalcError::NotSupported)
    }

    pub fn cause(&self) -> &CalcError {
        &self.source
    }
}

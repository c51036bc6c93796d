//! Update strategy parameters shared by the rollout calculators.

use super::error::CalcError;
use super::resources::{PodResources, Resources};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use std::str::FromStr;

/// A strategy field that is either an absolute pod count or a percentage of the replicas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntOrPercent {
    Absolute(i64),
    Percent(f64),
}

impl IntOrPercent {
    /// Default for both maxUnavailable and maxSurge of a rolling deployment.
    pub const ROLLING_DEFAULT: Self = Self::Percent(25.0);

    pub fn from_int_or_string(value: &IntOrString) -> Result<Self, CalcError> {
        match value {
            IntOrString::Int(n) => Ok(Self::Absolute(i64::from(*n))),
            IntOrString::String(s) => s.parse(),
        }
    }

    /// Absolute pod count relative to `total` replicas.
    ///
    /// Percentages round up when `round_up` is set and down otherwise; the
    /// direction changes replica counts, so callers must pick the one the
    /// orchestrator uses for the field.
    pub fn resolve(&self, total: i32, round_up: bool) -> i64 {
        match *self {
            Self::Absolute(n) => n,
            Self::Percent(percent) => {
                let scaled = percent * f64::from(total) / 100.0;
                if round_up {
                    scaled.ceil() as i64
                } else {
                    scaled.floor() as i64
                }
            }
        }
    }
}

impl FromStr for IntOrPercent {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .strip_suffix('%')
            .and_then(|number| number.trim().parse::<f64>().ok())
            .filter(|percent| percent.is_finite())
            .map(Self::Percent)
            .ok_or_else(|| CalcError::InvalidIntOrPercent(s.to_string()))
    }
}

/// Resolve an optional strategy field to a 32-bit pod count.
pub(crate) fn resolve_field(
    value: Option<&IntOrString>,
    default: IntOrPercent,
    replicas: i32,
    round_up: bool,
    field: &'static str,
) -> Result<i32, CalcError> {
    let value = match value {
        Some(value) => IntOrPercent::from_int_or_string(value)?,
        None => default,
    };
    i32::try_from(value.resolve(replicas, round_up)).map_err(|_| CalcError::Overflow { field })
}

// ============================================================================
// Surge-capable rollouts (Deployment, DeploymentConfig)
// ============================================================================

/// How far a rollout may dip below and rise above the desired replica count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolloutBounds {
    /// Pods that may be unavailable at once.
    pub max_unavailable: i32,
    /// Pods that may run in addition to the desired replicas.
    pub max_surge: i32,
}

impl RolloutBounds {
    /// Kill every pod, then start all new ones at once.
    pub fn recreate(replicas: i32) -> Self {
        Self {
            max_unavailable: replicas,
            max_surge: 0,
        }
    }

    /// Rolling replacement. Missing fields default to 25%; maxUnavailable
    /// rounds down and maxSurge rounds up.
    pub fn rolling(
        replicas: i32,
        max_unavailable: Option<&IntOrString>,
        max_surge: Option<&IntOrString>,
    ) -> Result<Self, CalcError> {
        Ok(Self {
            max_unavailable: resolve_field(
                max_unavailable,
                IntOrPercent::ROLLING_DEFAULT,
                replicas,
                false,
                "maxUnavailable",
            )?,
            max_surge: resolve_field(
                max_surge,
                IntOrPercent::ROLLING_DEFAULT,
                replicas,
                true,
                "maxSurge",
            )?,
        })
    }

    /// Pods that are not ready at the peak of the rollout: either running
    /// their init containers or started but not yet passing probes.
    pub fn non_ready_pods(&self) -> Result<i32, CalcError> {
        self.max_surge
            .checked_add(self.max_unavailable)
            .ok_or(CalcError::Overflow {
                field: "maxSurge + maxUnavailable",
            })
    }

    pub fn max_replicas(&self, replicas: i32) -> Result<i32, CalcError> {
        replicas.checked_add(self.max_surge).ok_or(CalcError::Overflow {
            field: "replicas + maxSurge",
        })
    }

    /// Resources at the peak of the rollout: the ready pods at their normal
    /// footprint plus every non-ready pod at its maximum footprint.
    pub fn peak(&self, pod: &PodResources, replicas: i32) -> Result<Resources, CalcError> {
        let ready = replicas
            .checked_sub(self.max_unavailable)
            .ok_or(CalcError::Overflow {
                field: "replicas - maxUnavailable",
            })?;
        Ok(pod.containers * ready + pod.max_resources * self.non_ready_pods()?)
    }
}

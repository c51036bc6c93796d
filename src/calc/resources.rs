//! CPU/memory request and limit totals, and their aggregation per pod.

use super::error::CalcError;
use super::quantity::{Format, Quantity};
use k8s_openapi::api::core::v1::{Container, PodSpec, ResourceRequirements};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity as ManifestQuantity;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Requests and limits for CPU and memory, treated as one unit so arithmetic
/// applies to all four quantities alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resources {
    /// CPU request
    pub cpu_min: Quantity,
    /// CPU limit
    pub cpu_max: Quantity,
    /// Memory request
    pub memory_min: Quantity,
    /// Memory limit
    pub memory_max: Quantity,
}

impl Default for Resources {
    fn default() -> Self {
        Self {
            cpu_min: Quantity::zero(Format::DecimalSI),
            cpu_max: Quantity::zero(Format::DecimalSI),
            memory_min: Quantity::zero(Format::BinarySI),
            memory_max: Quantity::zero(Format::BinarySI),
        }
    }
}

impl Resources {
    /// Read requests/limits from a container's resource declaration.
    ///
    /// Absent declarations count as zero.
    pub fn from_requirements(requirements: Option<&ResourceRequirements>) -> Result<Self, CalcError> {
        let requests = requirements.and_then(|r| r.requests.as_ref());
        let limits = requirements.and_then(|r| r.limits.as_ref());

        Ok(Self {
            cpu_min: lookup(requests, "cpu", Format::DecimalSI)?,
            cpu_max: lookup(limits, "cpu", Format::DecimalSI)?,
            memory_min: lookup(requests, "memory", Format::BinarySI)?,
            memory_max: lookup(limits, "memory", Format::BinarySI)?,
        })
    }

    /// Element-wise maximum.
    pub fn max(self, other: Self) -> Self {
        Self {
            cpu_min: self.cpu_min.max(other.cpu_min),
            cpu_max: self.cpu_max.max(other.cpu_max),
            memory_min: self.memory_min.max(other.memory_min),
            memory_max: self.memory_max.max(other.memory_max),
        }
    }

    /// The four quantities in the order CPU request, CPU limit, memory request, memory limit.
    pub fn to_array(self) -> [Quantity; 4] {
        [self.cpu_min, self.cpu_max, self.memory_min, self.memory_max]
    }

    pub fn from_array([cpu_min, cpu_max, memory_min, memory_max]: [Quantity; 4]) -> Self {
        Self {
            cpu_min,
            cpu_max,
            memory_min,
            memory_max,
        }
    }
}

impl fmt::Display for Resources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cpu {}/{}, memory {}/{}",
            self.cpu_min, self.cpu_max, self.memory_min, self.memory_max
        )
    }
}

fn lookup(
    list: Option<&BTreeMap<String, ManifestQuantity>>,
    resource: &str,
    format: Format,
) -> Result<Quantity, CalcError> {
    match list.and_then(|l| l.get(resource)) {
        Some(raw) => raw.0.parse().map_err(|source| CalcError::InvalidQuantity {
            resource: resource.to_string(),
            source,
        }),
        None => Ok(Quantity::zero(format)),
    }
}

impl Add for Resources {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            cpu_min: self.cpu_min + rhs.cpu_min,
            cpu_max: self.cpu_max + rhs.cpu_max,
            memory_min: self.memory_min + rhs.memory_min,
            memory_max: self.memory_max + rhs.memory_max,
        }
    }
}

/// Element-wise difference; negative when `rhs` is larger in a dimension.
impl Sub for Resources {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            cpu_min: self.cpu_min - rhs.cpu_min,
            cpu_max: self.cpu_max - rhs.cpu_max,
            memory_min: self.memory_min - rhs.memory_min,
            memory_max: self.memory_max - rhs.memory_max,
        }
    }
}

impl Mul<i32> for Resources {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self {
        Self {
            cpu_min: self.cpu_min.scale_int(rhs),
            cpu_max: self.cpu_max.scale_int(rhs),
            memory_min: self.memory_min.scale_int(rhs),
            memory_max: self.memory_max.scale_int(rhs),
        }
    }
}

/// Scales CPU to the millicore and memory to the byte.
impl Mul<f64> for Resources {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self {
            cpu_min: self.cpu_min.scale(rhs),
            cpu_max: self.cpu_max.scale(rhs),
            memory_min: self.memory_min.scale_to_units(rhs),
            memory_max: self.memory_max.scale_to_units(rhs),
        }
    }
}

// ============================================================================
// Pod Resources
// ============================================================================

/// Resources of one pod template.
///
/// Init containers run to completion before the ordinary containers start,
/// so at any instant a pod needs whichever group is larger, never the sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PodResources {
    /// Sum over the ordinary containers.
    pub containers: Resources,
    /// Sum over the init containers.
    pub init_containers: Resources,
    /// Element-wise max of `containers` and `init_containers`.
    pub max_resources: Resources,
}

impl PodResources {
    pub fn new(containers: Resources, init_containers: Resources) -> Self {
        Self {
            containers,
            init_containers,
            max_resources: containers.max(init_containers),
        }
    }

    /// Aggregate a pod template. A template without a pod spec needs nothing.
    pub fn from_pod_spec(spec: Option<&PodSpec>) -> Result<Self, CalcError> {
        let Some(spec) = spec else {
            return Ok(Self::default());
        };

        let containers = sum_containers(&spec.containers)?;
        let init_containers = sum_containers(spec.init_containers.as_deref().unwrap_or_default())?;
        Ok(Self::new(containers, init_containers))
    }
}

fn sum_containers(containers: &[Container]) -> Result<Resources, CalcError> {
    containers.iter().try_fold(Resources::default(), |total, container| {
        Ok(total + Resources::from_requirements(container.resources.as_ref())?)
    })
}

// ============================================================================
// Tests
// ============================================================================

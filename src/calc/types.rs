//! Result types produced by the rollout calculators.

use super::resources::{PodResources, Resources};
use crate::manifest::WorkloadKind;
use serde::Serialize;

/// Descriptive metadata of a workload, needed for a detailed report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Details {
    pub version: String,
    pub kind: String,
    pub name: String,
    pub strategy: String,
    pub replicas: i32,
    pub max_replicas: i32,
}

impl Details {
    pub fn new(kind: WorkloadKind, name: Option<&str>) -> Self {
        Self {
            version: kind.api_version().to_string(),
            kind: kind.as_str().to_string(),
            name: name.unwrap_or_default().to_string(),
            ..Self::default()
        }
    }

    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = strategy.into();
        self
    }

    pub fn with_replicas(mut self, replicas: i32, max_replicas: i32) -> Self {
        self.replicas = replicas;
        self.max_replicas = max_replicas;
        self
    }
}

/// Compute resources one workload needs, at rest and at the peak of a rollout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceUsage {
    /// Total while no rollout is in progress.
    pub normal_resources: Resources,
    /// Peak total reachable during a rollout.
    pub rollout_resources: Resources,
    pub details: Details,
}

impl ResourceUsage {
    pub fn new(normal_resources: Resources, rollout_resources: Resources, details: Details) -> Self {
        Self {
            normal_resources,
            rollout_resources,
            details,
        }
    }

    /// Usage of a workload modeled as a single pod: normally its containers,
    /// at worst whichever of containers or init containers is larger.
    pub fn single_pod(pod: &PodResources, details: Details) -> Self {
        Self::new(pod.containers, pod.max_resources, details)
    }

    /// Extra resources a rollout needs on top of the normal footprint.
    pub fn rollout_overhead(&self) -> Resources {
        self.rollout_resources - self.normal_resources
    }
}

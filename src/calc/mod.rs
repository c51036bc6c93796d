//! Resource usage of Kubernetes workloads.
//!
//! Each supported workload kind has a calculator that derives two totals
//! from the pod template, the replica count and the update strategy: the
//! resources needed while nothing changes, and the peak reached during a
//! rollout. [`total`] aggregates many workloads into the quota they need
//! together.

mod daemon_set;
mod deployment;
mod deployment_config;
pub mod error;
mod job;
mod pod;
pub mod quantity;
pub mod resources;
mod stateful_set;
pub mod strategy;
pub mod total;
pub mod types;

pub use error::{CalcError, CalculationError};
pub use quantity::{Format, Quantity};
pub use resources::{PodResources, Resources};
pub use strategy::IntOrPercent;
pub use total::total;
pub use types::{Details, ResourceUsage};

use crate::manifest::Workload;
use log::debug;

/// Calculate the resource usage of one decoded workload.
pub fn resource_usage(workload: &Workload) -> Result<ResourceUsage, CalculationError> {
    let result = match workload {
        Workload::Deployment(w) => deployment::deployment(w),
        Workload::DeploymentConfig(w) => deployment_config::deployment_config(w),
        Workload::StatefulSet(w) => stateful_set::stateful_set(w),
        Workload::DaemonSet(w) => daemon_set::daemon_set(w),
        Workload::Job(w) => job::job(w),
        Workload::CronJob(w) => job::cron_job(w),
        Workload::Pod(w) => pod::pod(w),
    };

    let kind = workload.kind();
    let usage =
        result.map_err(|e| CalculationError::new(kind.api_version(), kind.as_str(), e))?;

    debug!(
        "{kind} {}: replicas {}/{}, normal {}, rollout {}",
        usage.details.name,
        usage.details.replicas,
        usage.details.max_replicas,
        usage.normal_resources,
        usage.rollout_resources
    );

    Ok(usage)
}

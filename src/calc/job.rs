//! Jobs and CronJobs (batch/v1). Both run a single pod per execution.

use super::error::CalcError;
use super::resources::PodResources;
use super::types::{Details, ResourceUsage};
use crate::manifest::WorkloadKind;
use k8s_openapi::api::batch::v1::{CronJob, Job};

pub(crate) fn job(job: &Job) -> Result<ResourceUsage, CalcError> {
    let pod = PodResources::from_pod_spec(
        job.spec.as_ref().and_then(|s| s.template.spec.as_ref()),
    )?;
    let details = Details::new(WorkloadKind::Job, job.metadata.name.as_deref());

    Ok(ResourceUsage::single_pod(&pod, details))
}

/// Concurrent executions of the same CronJob are not accounted for.
pub(crate) fn cron_job(cron_job: &CronJob) -> Result<ResourceUsage, CalcError> {
    let pod_spec = cron_job
        .spec
        .as_ref()
        .and_then(|s| s.job_template.spec.as_ref())
        .and_then(|s| s.template.spec.as_ref());
    let pod = PodResources::from_pod_spec(pod_spec)?;
    let details = Details::new(WorkloadKind::CronJob, cron_job.metadata.name.as_deref());

    Ok(ResourceUsage::single_pod(&pod, details))
}

//! Bare pods (v1).

use super::error::CalcError;
use super::resources::PodResources;
use super::types::{Details, ResourceUsage};
use crate::manifest::WorkloadKind;
use k8s_openapi::api::core::v1::Pod;

pub(crate) fn pod(pod: &Pod) -> Result<ResourceUsage, CalcError> {
    let resources = PodResources::from_pod_spec(pod.spec.as_ref())?;
    let details = Details::new(WorkloadKind::Pod, pod.metadata.name.as_deref());

    Ok(ResourceUsage::single_pod(&resources, details))
}

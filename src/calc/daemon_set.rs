//! DaemonSets (apps/v1).

use super::error::CalcError;
use super::resources::PodResources;
use super::types::{Details, ResourceUsage};
use crate::manifest::WorkloadKind;
use k8s_openapi::api::apps::v1::DaemonSet;

/// One pod per eligible node, but the node count is unknown here, so the
/// set is modeled as a single pod.
pub(crate) fn daemon_set(set: &DaemonSet) -> Result<ResourceUsage, CalcError> {
    let pod = PodResources::from_pod_spec(
        set.spec.as_ref().and_then(|s| s.template.spec.as_ref()),
    )?;
    let details =
        Details::new(WorkloadKind::DaemonSet, set.metadata.name.as_deref()).with_replicas(1, 1);

    Ok(ResourceUsage::single_pod(&pod, details))
}

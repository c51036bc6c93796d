//! StatefulSets (apps/v1).
//!
//! Pods of a StatefulSet are replaced in place, ordinal by ordinal, so a
//! rollout never runs more pods than `spec.replicas`.

use super::error::CalcError;
use super::resources::{PodResources, Resources};
use super::strategy::{IntOrPercent, resolve_field};
use super::types::{Details, ResourceUsage};
use crate::manifest::WorkloadKind;
use k8s_openapi::api::apps::v1::StatefulSet;
use log::{trace, warn};

const ON_DELETE: &str = "OnDelete";
const ROLLING_UPDATE: &str = "RollingUpdate";

const DEFAULT_REPLICAS: i32 = 1;
const DEFAULT_MAX_UNAVAILABLE: IntOrPercent = IntOrPercent::Absolute(1);

pub(crate) fn stateful_set(set: &StatefulSet) -> Result<ResourceUsage, CalcError> {
    let name = set.metadata.name.as_deref();
    let spec = set.spec.as_ref();
    let replicas = spec.and_then(|s| s.replicas).unwrap_or(DEFAULT_REPLICAS);
    let strategy = spec.and_then(|s| s.update_strategy.as_ref());
    let strategy_type = strategy
        .and_then(|s| s.type_.as_deref())
        .filter(|t| !t.is_empty())
        .unwrap_or(ROLLING_UPDATE);

    let max_unavailable = match strategy_type {
        // Nothing is replaced until pods are deleted by hand. Worst case is
        // deleting all of them at once.
        ON_DELETE => replicas,
        other => {
            if other != ROLLING_UPDATE {
                warn!(
                    "statefulset {}: unknown update strategy {other:?}, assuming {ROLLING_UPDATE}",
                    name.unwrap_or_default()
                );
            }
            let rolling = strategy.and_then(|s| s.rolling_update.as_ref());
            if rolling.is_none() {
                trace!(
                    "statefulset {}: no rollingUpdate parameters, assuming maxUnavailable 1",
                    name.unwrap_or_default()
                );
            }
            resolve_field(
                rolling.and_then(|r| r.max_unavailable.as_ref()),
                DEFAULT_MAX_UNAVAILABLE,
                replicas,
                true,
                "maxUnavailable",
            )?
        }
    };

    let pod = PodResources::from_pod_spec(spec.and_then(|s| s.template.spec.as_ref()))?;
    let ready = replicas
        .checked_sub(max_unavailable)
        .ok_or(CalcError::Overflow {
            field: "replicas - maxUnavailable",
        })?;
    let rollout: Resources = pod.containers * ready + pod.max_resources * max_unavailable;
    let normal = pod.containers * replicas;

    Ok(ResourceUsage::new(
        normal,
        rollout,
        Details::new(WorkloadKind::StatefulSet, name)
            .with_strategy(strategy_type)
            .with_replicas(replicas, replicas),
    ))
}

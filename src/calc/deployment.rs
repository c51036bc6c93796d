//! Deployments (apps/v1).

use super::error::CalcError;
use super::resources::{PodResources, Resources};
use super::strategy::RolloutBounds;
use super::types::{Details, ResourceUsage};
use crate::manifest::WorkloadKind;
use k8s_openapi::api::apps::v1::Deployment;
use log::trace;

const RECREATE: &str = "Recreate";
const ROLLING_UPDATE: &str = "RollingUpdate";

/// Replica count the orchestrator assumes when `spec.replicas` is absent.
const DEFAULT_REPLICAS: i32 = 1;

/// Calculate the cpu/memory a single deployment needs, taking replicas and
/// the deployment strategy into account.
pub(crate) fn deployment(deployment: &Deployment) -> Result<ResourceUsage, CalcError> {
    let name = deployment.metadata.name.as_deref();
    let spec = deployment.spec.as_ref();
    let replicas = spec.and_then(|s| s.replicas).unwrap_or(DEFAULT_REPLICAS);
    let strategy = spec.and_then(|s| s.strategy.as_ref());
    // RollingUpdate is the default and may be left empty.
    let strategy_type = strategy
        .and_then(|s| s.type_.as_deref())
        .filter(|t| !t.is_empty())
        .unwrap_or(ROLLING_UPDATE);

    let details = Details::new(WorkloadKind::Deployment, name).with_strategy(strategy_type);

    if replicas == 0 {
        return Ok(ResourceUsage::new(
            Resources::default(),
            Resources::default(),
            details,
        ));
    }

    let bounds = match strategy_type {
        RECREATE => RolloutBounds::recreate(replicas),
        ROLLING_UPDATE => {
            let rolling = strategy.and_then(|s| s.rolling_update.as_ref());
            if rolling.is_none() {
                trace!(
                    "deployment {}: no rollingUpdate parameters, assuming 25%/25%",
                    name.unwrap_or_default()
                );
            }
            RolloutBounds::rolling(
                replicas,
                rolling.and_then(|r| r.max_unavailable.as_ref()),
                rolling.and_then(|r| r.max_surge.as_ref()),
            )?
        }
        other => {
            return Err(CalcError::UnknownStrategy {
                kind: WorkloadKind::Deployment.as_str(),
                name: name.unwrap_or_default().to_string(),
                strategy: other.to_string(),
            });
        }
    };

    let pod = PodResources::from_pod_spec(spec.and_then(|s| s.template.spec.as_ref()))?;
    surge_rollout_usage(&pod, replicas, bounds, Resources::default(), details)
}

/// Usage of a workload whose rollout may surge above and dip below its
/// replica count. `rollout_extra` is added once to the rollout peak only.
pub(super) fn surge_rollout_usage(
    pod: &PodResources,
    replicas: i32,
    bounds: RolloutBounds,
    rollout_extra: Resources,
    details: Details,
) -> Result<ResourceUsage, CalcError> {
    let normal = pod.containers * replicas;
    let rollout = bounds.peak(pod, replicas)? + rollout_extra;
    let max_replicas = bounds.max_replicas(replicas)?;

    Ok(ResourceUsage::new(
        normal,
        rollout,
        details.with_replicas(replicas, max_replicas),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::quantity::Quantity;

    fn q(s: &str) -> Quantity {
        s.parse().unwrap()
    }

    fn parse(yaml: &str) -> Deployment {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn manifest(replicas: &str, strategy: &str) -> String {
        format!(
            r#"
apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
spec:
  {replicas}
  selector:
    matchLabels:
      app: web
  {strategy}
  template:
    metadata:
      labels:
        app: web
    spec:
      containers:
        - name: web
          image: nginx
          resources:
            requests:
              cpu: 250m
              memory: 2Gi
            limits:
              cpu: 500m
              memory: 4Gi
"#
        )
    }

    #[test]
    fn test_default_rolling_update() {
        let usage = deployment(&parse(&manifest("replicas: 10", ""))).unwrap();

        // 2 unavailable (floor of 25%), 3 surge (ceil of 25%)
        assert_eq!(usage.details.replicas, 10);
        assert_eq!(usage.details.max_replicas, 13);
        assert_eq!(usage.details.strategy, "RollingUpdate");
        assert_eq!(usage.normal_resources.cpu_min, q("2500m"));
        assert_eq!(usage.rollout_resources.cpu_min, q("3250m"));
        assert_eq!(usage.rollout_resources.cpu_max, q("6500m"));
        assert_eq!(usage.rollout_resources.memory_min, q("26Gi"));
        assert_eq!(usage.rollout_resources.memory_max, q("52Gi"));
    }

    #[test]
    fn test_absolute_values() {
        let strategy = r#"strategy:
    type: RollingUpdate
    rollingUpdate:
      maxUnavailable: 1
      maxSurge: 2"#;
        let usage = deployment(&parse(&manifest("replicas: 10", strategy))).unwrap();

        assert_eq!(usage.details.max_replicas, 12);
        // 9 ready + 3 starting
        assert_eq!(usage.rollout_resources.cpu_min, q("3"));
        assert_eq!(usage.rollout_resources.memory_max, q("48Gi"));
    }

    #[test]
    fn test_partial_rolling_parameters_default_individually() {
        let strategy = r#"strategy:
    rollingUpdate:
      maxSurge: 0"#;
        let usage = deployment(&parse(&manifest("replicas: 10", strategy))).unwrap();

        assert_eq!(usage.details.max_replicas, 10);
        assert_eq!(usage.rollout_resources.cpu_min, q("2500m"));
    }

    #[test]
    fn test_recreate() {
        let strategy = r#"strategy:
    type: Recreate"#;
        let usage = deployment(&parse(&manifest("replicas: 10", strategy))).unwrap();

        assert_eq!(usage.details.strategy, "Recreate");
        assert_eq!(usage.details.max_replicas, 10);
        assert_eq!(usage.rollout_resources.cpu_min, q("2500m"));
        assert_eq!(usage.rollout_resources.memory_max, q("40Gi"));
    }

    #[test]
    fn test_zero_replicas() {
        let strategy = r#"strategy:
    type: SomethingElse"#;
        let usage = deployment(&parse(&manifest("replicas: 0", strategy))).unwrap();

        assert_eq!(usage.normal_resources, Resources::default());
        assert_eq!(usage.rollout_resources, Resources::default());
        assert_eq!(usage.details.replicas, 0);
        assert_eq!(usage.details.max_replicas, 0);
    }

    #[test]
    fn test_missing_replicas_defaults_to_one() {
        let usage = deployment(&parse(&manifest("", ""))).unwrap();

        assert_eq!(usage.details.replicas, 1);
        // 25% of 1: 0 unavailable, 1 surge
        assert_eq!(usage.details.max_replicas, 2);
        assert_eq!(usage.rollout_resources.cpu_min, q("500m"));
    }

    #[test]
    fn test_unknown_strategy() {
        let strategy = r#"strategy:
    type: BlueGreen"#;
        let err = deployment(&parse(&manifest("replicas: 3", strategy))).unwrap_err();

        assert!(matches!(
            err,
            CalcError::UnknownStrategy { ref name, ref strategy, .. } if name == "web" && strategy == "BlueGreen"
        ));
    }

    #[test]
    fn test_init_containers_count_for_non_ready_pods_only() {
        let usage = deployment(&parse(
            r#"
apiVersion: apps/v1
kind: Deployment
metadata:
  name: api
spec:
  replicas: 3
  selector:
    matchLabels:
      app: api
  template:
    spec:
      initContainers:
        - name: init
          resources:
            requests:
              cpu: "1"
              memory: 4Gi
      containers:
        - name: api
          resources:
            requests:
              cpu: 200m
              memory: 1Gi
"#,
        ))
        .unwrap();

        // 3 replicas: 0 unavailable, 1 surge -> 3 ready + 1 starting at init size
        assert_eq!(usage.details.max_replicas, 4);
        assert_eq!(usage.rollout_resources.cpu_min, q("1600m"));
        assert_eq!(usage.rollout_resources.memory_min, q("7Gi"));
        assert_eq!(usage.normal_resources.cpu_min, q("600m"));
    }
}

//! OpenShift DeploymentConfigs (apps.openshift.io/v1).

use super::deployment::surge_rollout_usage;
use super::error::CalcError;
use super::resources::{PodResources, Resources};
use super::strategy::RolloutBounds;
use super::types::{Details, ResourceUsage};
use crate::manifest::{DeploymentConfig, WorkloadKind};

const RECREATE: &str = "Recreate";
const ROLLING: &str = "Rolling";

/// Calculate the cpu/memory a single DeploymentConfig needs. Same surge and
/// unavailability model as a Deployment, plus the deployer pod's resources
/// once during the rollout.
pub(crate) fn deployment_config(config: &DeploymentConfig) -> Result<ResourceUsage, CalcError> {
    let name = config.metadata.name.as_deref();
    let replicas = config.spec.replicas;
    let strategy = &config.spec.strategy;
    let strategy_type = strategy
        .type_
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(ROLLING);

    let details = Details::new(WorkloadKind::DeploymentConfig, name).with_strategy(strategy_type);

    if replicas == 0 {
        return Ok(ResourceUsage::new(
            Resources::default(),
            Resources::default(),
            details,
        ));
    }

    // Defaults mirror the Kubernetes Deployment ones.
    let bounds = match strategy_type {
        RECREATE => RolloutBounds::recreate(replicas),
        ROLLING => {
            let rolling = strategy.rolling_params.as_ref();
            RolloutBounds::rolling(
                replicas,
                rolling.and_then(|r| r.max_unavailable.as_ref()),
                rolling.and_then(|r| r.max_surge.as_ref()),
            )?
        }
        other => {
            return Err(CalcError::UnknownStrategy {
                kind: WorkloadKind::DeploymentConfig.as_str(),
                name: name.unwrap_or_default().to_string(),
                strategy: other.to_string(),
            });
        }
    };

    let pod = PodResources::from_pod_spec(
        config
            .spec
            .template
            .as_ref()
            .and_then(|t| t.spec.as_ref()),
    )?;
    let deployer = Resources::from_requirements(strategy.resources.as_ref())?;
    surge_rollout_usage(&pod, replicas, bounds, deployer, details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::quantity::Quantity;

    fn q(s: &str) -> Quantity {
        s.parse().unwrap()
    }

    fn parse(strategy: &str) -> DeploymentConfig {
        serde_yaml::from_str(&format!(
            r#"
apiVersion: apps.openshift.io/v1
kind: DeploymentConfig
metadata:
  name: legacy
spec:
  replicas: 10
  {strategy}
  template:
    spec:
      containers:
        - name: legacy
          resources:
            requests:
              cpu: 250m
              memory: 2Gi
            limits:
              cpu: 500m
              memory: 4Gi
"#
        ))
        .unwrap()
    }

    #[test]
    fn test_default_rolling() {
        let usage = deployment_config(&parse("")).unwrap();

        assert_eq!(usage.details.kind, "DeploymentConfig");
        assert_eq!(usage.details.version, "apps.openshift.io/v1");
        assert_eq!(usage.details.strategy, "Rolling");
        assert_eq!(usage.details.max_replicas, 13);
        assert_eq!(usage.rollout_resources.cpu_min, q("3250m"));
        assert_eq!(usage.normal_resources.cpu_min, q("2500m"));
    }

    #[test]
    fn test_deployer_resources_added_once_to_rollout() {
        let usage = deployment_config(&parse(
            r#"strategy:
    type: Rolling
    rollingParams:
      maxUnavailable: 1
      maxSurge: 1
    resources:
      requests:
        cpu: 100m
        memory: 256Mi
      limits:
        cpu: 200m
        memory: 512Mi"#,
        ))
        .unwrap();

        // 9 ready + 2 starting pods, plus one deployer
        assert_eq!(usage.rollout_resources.cpu_min, q("2850m"));
        assert_eq!(usage.rollout_resources.cpu_max, q("5700m"));
        assert_eq!(usage.rollout_resources.memory_min, q("22784Mi"));
        assert_eq!(usage.rollout_resources.memory_max, q("45568Mi"));
        assert_eq!(usage.normal_resources.cpu_min, q("2500m"));
        assert_eq!(usage.details.max_replicas, 11);
    }

    #[test]
    fn test_recreate() {
        let usage = deployment_config(&parse(
            r#"strategy:
    type: Recreate"#,
        ))
        .unwrap();

        assert_eq!(usage.details.max_replicas, 10);
        assert_eq!(usage.rollout_resources.memory_max, q("40Gi"));
    }

    #[test]
    fn test_unknown_strategy() {
        let err = deployment_config(&parse(
            r#"strategy:
    type: RollingUpdate"#,
        ))
        .unwrap_err();

        assert!(matches!(err, CalcError::UnknownStrategy { kind: "DeploymentConfig", .. }));
    }

    #[test]
    fn test_missing_replicas_is_zero() {
        let dc: DeploymentConfig = serde_yaml::from_str(
            r#"
apiVersion: apps.openshift.io/v1
kind: DeploymentConfig
metadata:
  name: idle
spec:
  template:
    spec:
      containers:
        - name: idle
          resources:
            requests:
              cpu: "1"
"#,
        )
        .unwrap();
        let usage = deployment_config(&dc).unwrap();

        assert_eq!(usage.details.replicas, 0);
        assert_eq!(usage.rollout_resources, Resources::default());
    }
}

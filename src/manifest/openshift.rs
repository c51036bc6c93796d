//! OpenShift `apps.openshift.io/v1` DeploymentConfig.
//!
//! k8s-openapi only covers upstream Kubernetes, so the subset of the
//! DeploymentConfig schema the calculation reads is modeled here. Unknown
//! fields (triggers, selector, status, ...) are ignored.

use k8s_openapi::api::core::v1::{PodTemplateSpec, ResourceRequirements};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use serde::Deserialize;

pub const API_VERSION: &str = "apps.openshift.io/v1";
pub const KIND: &str = "DeploymentConfig";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfig {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: DeploymentConfigSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfigSpec {
    /// Desired replicas. A plain int field, so absent means zero.
    #[serde(default)]
    pub replicas: i32,
    #[serde(default)]
    pub strategy: DeploymentStrategy,
    #[serde(default)]
    pub template: Option<PodTemplateSpec>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentStrategy {
    /// `Recreate`, `Rolling` or `Custom`; empty means `Rolling`.
    #[serde(rename = "type", default)]
    pub type_: Option<String>,
    #[serde(default)]
    pub rolling_params: Option<RollingDeploymentStrategyParams>,
    /// Resources of the deployer pod that drives the rollout.
    #[serde(default)]
    pub resources: Option<ResourceRequirements>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollingDeploymentStrategyParams {
    #[serde(default)]
    pub max_unavailable: Option<IntOrString>,
    #[serde(default)]
    pub max_surge: Option<IntOrString>,
}

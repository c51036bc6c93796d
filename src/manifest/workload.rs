//! The workload kinds a resource quota can be calculated for.

use super::openshift::{self, DeploymentConfig};
use k8s_openapi::Resource;
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, StatefulSet};
use k8s_openapi::api::batch::v1::{CronJob, Job};
use k8s_openapi::api::core::v1::Pod;
use serde::Deserialize;
use std::fmt;

/// A supported apiVersion/kind pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkloadKind {
    Deployment,
    DeploymentConfig,
    StatefulSet,
    DaemonSet,
    Job,
    CronJob,
    Pod,
}

impl WorkloadKind {
    pub const ALL: [WorkloadKind; 7] = [
        WorkloadKind::Deployment,
        WorkloadKind::DeploymentConfig,
        WorkloadKind::StatefulSet,
        WorkloadKind::DaemonSet,
        WorkloadKind::Job,
        WorkloadKind::CronJob,
        WorkloadKind::Pod,
    ];

    pub fn api_version(&self) -> &'static str {
        match self {
            WorkloadKind::Deployment => Deployment::API_VERSION,
            WorkloadKind::DeploymentConfig => openshift::API_VERSION,
            WorkloadKind::StatefulSet => StatefulSet::API_VERSION,
            WorkloadKind::DaemonSet => DaemonSet::API_VERSION,
            WorkloadKind::Job => Job::API_VERSION,
            WorkloadKind::CronJob => CronJob::API_VERSION,
            WorkloadKind::Pod => Pod::API_VERSION,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadKind::Deployment => Deployment::KIND,
            WorkloadKind::DeploymentConfig => openshift::KIND,
            WorkloadKind::StatefulSet => StatefulSet::KIND,
            WorkloadKind::DaemonSet => DaemonSet::KIND,
            WorkloadKind::Job => Job::KIND,
            WorkloadKind::CronJob => CronJob::KIND,
            WorkloadKind::Pod => Pod::KIND,
        }
    }

    /// Look up a kind by apiVersion and kind. Both must match exactly.
    pub fn from_type_meta(api_version: &str, kind: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.api_version() == api_version && k.as_str() == kind)
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.api_version(), self.as_str())
    }
}

/// A decoded workload object of one of the supported kinds.
#[derive(Debug, Clone)]
pub enum Workload {
    Deployment(Box<Deployment>),
    DeploymentConfig(Box<DeploymentConfig>),
    StatefulSet(Box<StatefulSet>),
    DaemonSet(Box<DaemonSet>),
    Job(Box<Job>),
    CronJob(Box<CronJob>),
    Pod(Box<Pod>),
}

impl Workload {
    /// Deserialize a single YAML document as the given kind.
    pub fn decode(kind: WorkloadKind, text: &str) -> Result<Self, serde_yaml::Error> {
        Ok(match kind {
            WorkloadKind::Deployment => Workload::Deployment(from_yaml(text)?),
            WorkloadKind::DeploymentConfig => Workload::DeploymentConfig(from_yaml(text)?),
            WorkloadKind::StatefulSet => Workload::StatefulSet(from_yaml(text)?),
            WorkloadKind::DaemonSet => Workload::DaemonSet(from_yaml(text)?),
            WorkloadKind::Job => Workload::Job(from_yaml(text)?),
            WorkloadKind::CronJob => Workload::CronJob(from_yaml(text)?),
            WorkloadKind::Pod => Workload::Pod(from_yaml(text)?),
        })
    }

    pub fn kind(&self) -> WorkloadKind {
        match self {
            Workload::Deployment(_) => WorkloadKind::Deployment,
            Workload::DeploymentConfig(_) => WorkloadKind::DeploymentConfig,
            Workload::StatefulSet(_) => WorkloadKind::StatefulSet,
            Workload::DaemonSet(_) => WorkloadKind::DaemonSet,
            Workload::Job(_) => WorkloadKind::Job,
            Workload::CronJob(_) => WorkloadKind::CronJob,
            Workload::Pod(_) => WorkloadKind::Pod,
        }
    }

    /// `metadata.name`, if set.
    pub fn name(&self) -> Option<&str> {
        let metadata = match self {
            Workload::Deployment(w) => &w.metadata,
            Workload::DeploymentConfig(w) => &w.metadata,
            Workload::StatefulSet(w) => &w.metadata,
            Workload::DaemonSet(w) => &w.metadata,
            Workload::Job(w) => &w.metadata,
            Workload::CronJob(w) => &w.metadata,
            Workload::Pod(w) => &w.metadata,
        };
        metadata.name.as_deref()
    }
}

fn from_yaml<T: for<'de> Deserialize<'de>>(text: &str) -> Result<Box<T>, serde_yaml::Error> {
    serde_yaml::from_str(text).map(Box::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry() {
        assert_eq!(
            WorkloadKind::from_type_meta("apps/v1", "Deployment"),
            Some(WorkloadKind::Deployment)
        );
        assert_eq!(
            WorkloadKind::from_type_meta("apps.openshift.io/v1", "DeploymentConfig"),
            Some(WorkloadKind::DeploymentConfig)
        );
        assert_eq!(
            WorkloadKind::from_type_meta("batch/v1", "CronJob"),
            Some(WorkloadKind::CronJob)
        );
        assert_eq!(WorkloadKind::from_type_meta("v1", "Pod"), Some(WorkloadKind::Pod));
        // known kind, unregistered version
        assert_eq!(WorkloadKind::from_type_meta("apps/v1beta1", "Deployment"), None);
        assert_eq!(WorkloadKind::from_type_meta("v1", "Service"), None);
    }

    #[test]
    fn test_every_kind_round_trips_through_registry() {
        for kind in WorkloadKind::ALL {
            assert_eq!(
                WorkloadKind::from_type_meta(kind.api_version(), kind.as_str()),
                Some(kind)
            );
        }
        assert_eq!(WorkloadKind::StatefulSet.to_string(), "apps/v1/StatefulSet");
    }

    #[test]
    fn test_decode() {
        let workload = Workload::decode(
            WorkloadKind::Pod,
            "apiVersion: v1\nkind: Pod\nmetadata:\n  name: web\nspec:\n  containers: []\n",
        )
        .unwrap();

        assert_eq!(workload.kind(), WorkloadKind::Pod);
        assert_eq!(workload.name(), Some("web"));
    }

    #[test]
    fn test_decode_schema_mismatch() {
        let result = Workload::decode(
            WorkloadKind::Deployment,
            "apiVersion: apps/v1\nkind: Deployment\nspec:\n  replicas: many\n",
        );
        assert!(result.is_err());
    }
}

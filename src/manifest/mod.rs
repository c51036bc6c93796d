//! Decoding of Kubernetes and OpenShift manifests into typed workloads.
//!
//! A manifest stream is split into documents, the apiVersion/kind of each
//! document is checked against the supported kinds, and supported documents
//! are deserialized into their typed model.

pub mod document;
pub mod openshift;
pub mod workload;

pub use document::{Document, split_documents};
pub use openshift::DeploymentConfig;
pub use workload::{Workload, WorkloadKind};

use crate::calc::CalculationError;
use crate::error::{KuotaCalcError, Result};
use serde::Deserialize;

/// The apiVersion/kind header every Kubernetes object carries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMeta {
    #[serde(default)]
    pub api_version: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
}

/// Decode one document into a supported workload.
///
/// Unsupported apiVersion/kind pairs yield an error for which
/// [`KuotaCalcError::is_not_supported`] holds.
pub fn decode_document(document: &Document) -> Result<Workload> {
    let decode_error = |source| KuotaCalcError::Decode {
        line: document.line,
        source,
    };

    let meta: TypeMeta = serde_yaml::from_str(&document.text).map_err(decode_error)?;
    let api_version = meta
        .api_version
        .filter(|v| !v.is_empty())
        .ok_or(KuotaCalcError::MissingTypeMeta {
            line: document.line,
            field: "apiVersion",
        })?;
    let kind = meta
        .kind
        .filter(|k| !k.is_empty())
        .ok_or(KuotaCalcError::MissingTypeMeta {
            line: document.line,
            field: "kind",
        })?;

    let Some(workload_kind) = WorkloadKind::from_type_meta(&api_version, &kind) else {
        return Err(CalculationError::not_supported(api_version, kind).into());
    };

    Workload::decode(workload_kind, &document.text).map_err(decode_error)
}

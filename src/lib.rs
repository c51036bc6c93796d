//! # kuota-calc
//!
//! Calculates the resource quota a set of Kubernetes and OpenShift workloads
//! needs. Besides the resources of the running pods, the extra pods that
//! exist while a rollout is in progress are accounted for, so a namespace
//! quota sized with it does not block deployments.
//!
//! ## Example
//!
//! ```rust,no_run
//! use kuota_calc::{calc, resource_quota_from_yaml};
//!
//! # fn main() -> kuota_calc::Result<()> {
//! let manifest = std::fs::read_to_string("deployment.yaml")?;
//! let usage = resource_quota_from_yaml(&manifest)?;
//! println!("peak during rollout: {}", usage.rollout_resources);
//!
//! let total = calc::total(-1, &[usage]);
//! println!("CPU Request: {}", total.cpu_min);
//! # Ok(())
//! # }
//! ```

pub mod calc;
pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod handlers;
pub mod manifest;

pub use calc::{ResourceUsage, Resources};
pub use error::{KuotaCalcError, Result};
pub use handlers::*;

use manifest::Document;

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Calculate the resource usage of a single-document manifest.
pub fn resource_quota_from_yaml(yaml: &str) -> Result<ResourceUsage> {
    usage_from_document(&Document {
        line: 1,
        text: yaml.to_string(),
    })
}

/// Decode one document and calculate its resource usage.
pub fn usage_from_document(document: &Document) -> Result<ResourceUsage> {
    let workload = manifest::decode_document(document)?;
    Ok(calc::resource_usage(&workload)?)
}

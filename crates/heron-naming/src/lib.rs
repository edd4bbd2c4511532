//! Naming conventions for Heron runtime pods.
//!
//! Every pod Heron launches for a workflow run carries deterministic names
//! and labels derived from the workflow identifier. The deployment layer
//! stamps them onto the pods it creates and the log pipeline indexes them,
//! so both sides must agree on a single source of truth. This crate is that
//! source:
//!
//! - [`ComponentRole`] — the roles a run-time component can play
//! - [`component_name`] — workflow id + role → the label value on the pod
//! - `LABEL_*` constants — the Kubernetes label keys Fluent Bit ships with
//!   every log document
//!
//! # Example
//!
//! ```rust
//! use heron_naming::{component_name, ComponentRole};
//!
//! let name = component_name("9e2b", ComponentRole::Cluster);
//! assert_eq!(name, "heron-run-cluster-9e2b");
//! ```

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label key carrying the Kubernetes job name of a batch job pod.
pub const LABEL_JOB_NAME: &str = "kubernetes.labels.job-name";

/// Label key carrying the workflow UUID on the run-batch pod.
pub const LABEL_WORKFLOW_UUID: &str = "kubernetes.labels.heron-run-batch-workflow-uuid";

/// Label key carrying the cluster name on distributed-cluster pods.
pub const LABEL_CLUSTER_NAME: &str = "kubernetes.labels.heron/cluster-name";

/// Label key carrying the component role on distributed-cluster pods.
pub const LABEL_COMPONENT: &str = "kubernetes.labels.heron/component";

/// Role a runtime component plays within a workflow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentRole {
    /// The cluster deployment as a whole.
    Cluster,
    /// The cluster scheduler process.
    Scheduler,
    /// A cluster worker process.
    Worker,
}

impl ComponentRole {
    /// Returns the role tag used in pod names and label values.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cluster => "cluster",
            Self::Scheduler => "scheduler",
            Self::Worker => "worker",
        }
    }
}

impl fmt::Display for ComponentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the deterministic name of a runtime component for a workflow run.
///
/// The result is the value the deployment layer writes into the
/// role-specific label on the pods it creates, e.g.
/// `heron-run-cluster-<workflow-id>` for the cluster deployment. The same
/// workflow id and role always produce the same name.
#[must_use]
pub fn component_name(workflow_id: &str, role: ComponentRole) -> String {
    format!("heron-run-{}-{}", role.as_str(), workflow_id)
}

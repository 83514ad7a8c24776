//! Service catalog models and workflow references.

use serde::{Deserialize, Serialize};

/// A sellable service from the catalog.
///
/// The ordered `workflows` list is what drives "next workflow" chaining;
/// `legacy_workflow_id` exists for records written before the list form and
/// loses to it on resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceCatalogItem {
    /// Unique identifier for the service
    pub id: u64,

    /// Service name
    pub name: String,

    /// Price in minor currency units
    pub price: i64,

    /// Ordered workflow references (sequence defined by [`WorkflowRef::order`])
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub workflows: Vec<WorkflowRef>,

    /// Legacy single-workflow pointer (string or array form)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_workflow_id: Option<LegacyWorkflowId>,
}

/// A reference from a service to a workflow, with its sequence position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowRef {
    /// Referenced workflow id
    pub workflow_id: String,

    /// Sequence position of this workflow for the service
    pub order: u32,

    /// Display name carried on the ref; used when synthesizing a stage for
    /// a workflow id the registry does not know
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Backward-compatible `workflowId` field: old records stored either a bare
/// id string or an array of ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum LegacyWorkflowId {
    /// Array form; each element gets an implicit ascending order
    Many(Vec<String>),
    /// Plain string form
    One(String),
}

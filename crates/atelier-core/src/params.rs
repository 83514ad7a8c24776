//! Parameter structures for tracker operations.
//!
//! Shared parameter structures used across interfaces (CLI today, others
//! later) without framework-specific derives. Interface layers wrap these
//! with their own derives (clap `Args`, etc.) and convert via `From`,
//! keeping the core free of UI framework concerns.

use serde::{Deserialize, Serialize};

use crate::models::{Stage, WorkflowRef};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters addressing one item within one order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemRef {
    /// The order holding the item
    pub order_id: u64,
    /// The item to operate on
    pub item_id: u64,
}

/// A retail product line for order entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductDraft {
    /// Product name
    pub name: String,
    /// Unit price in minor currency units
    pub price: i64,
    /// Quantity ordered
    pub quantity: u32,
}

/// Parameters for creating a new order.
///
/// Service items are referenced by catalog id and inherit name, price, and
/// workflow from the catalog; products are free-form lines born done.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOrder {
    /// Customer reference (free text)
    pub customer: Option<String>,
    /// Free-text note
    pub note: Option<String>,
    /// Service catalog ids, in processing sequence
    #[serde(default)]
    pub services: Vec<u64>,
    /// Retail product lines
    #[serde(default)]
    pub products: Vec<ProductDraft>,
    /// Operator recorded on the opening history entries
    pub actor: Option<String>,
}

/// Parameters for a requested stage move.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoveItem {
    /// The order holding the item
    pub order_id: u64,
    /// The item to move
    pub item_id: u64,
    /// Target stage id or terminal sentinel (`done`, `cancel`)
    pub target_status: String,
    /// Operator performing the move
    pub actor: String,
    /// Operator-supplied reason; required for backward moves
    pub reason: Option<String>,
    /// Operator confirmed a cancel drop
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for registering a workflow definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateWorkflow {
    /// Workflow id
    pub id: String,
    /// Display label
    pub label: String,
    /// Owning department
    pub department: Option<String>,
    /// Ordered stages
    #[serde(default)]
    pub stages: Vec<Stage>,
}

/// Parameters for creating a service catalog entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateService {
    /// Service name
    pub name: String,
    /// Price in minor currency units
    pub price: i64,
    /// Ordered workflow references
    #[serde(default)]
    pub workflows: Vec<WorkflowRef>,
}

/// Parameters for assigning staff to one task of an item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignTask {
    /// The item carrying the task assignment
    pub item_id: u64,
    /// The task within the item's stage checklist
    pub task_id: String,
    /// Member ids to assign
    #[serde(default)]
    pub member_ids: Vec<String>,
}

/// Parameters for checking a workflow stage task on or off.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetTaskDone {
    /// Workflow holding the stage
    pub workflow_id: String,
    /// Stage holding the task
    pub stage_id: String,
    /// Task to toggle
    pub task_id: String,
    /// New completion flag
    pub completed: bool,
}

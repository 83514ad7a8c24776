//! Workflow definition, stage, and task models.

use serde::{Deserialize, Serialize};

/// An ordered sequence of stages representing one phase of service
/// fulfillment (e.g. "Repair Process").
///
/// Definitions are authored elsewhere and loaded read-only into the
/// registry cache; the core resolves items against them but never writes
/// them back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowDefinition {
    /// Opaque workflow identifier
    pub id: String,

    /// Display label of the workflow
    pub label: String,

    /// Owning department, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    /// Ordered stages (sequence defined by [`Stage::order`], ties broken by
    /// array position)
    #[serde(default)]
    pub stages: Vec<Stage>,

    /// Service types this workflow applies to, if restricted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub service_types: Vec<String>,

    /// Default staff assigned at the workflow level
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assigned_members: Vec<String>,
}

impl WorkflowDefinition {
    /// Stages sorted by ascending `order`, ties broken by original array
    /// position. This ordering is what forward/backward classification
    /// runs against.
    pub fn stages_in_order(&self) -> Vec<&Stage> {
        let mut stages: Vec<(usize, &Stage)> = self.stages.iter().enumerate().collect();
        stages.sort_by_key(|(idx, stage)| (stage.order, *idx));
        stages.into_iter().map(|(_, stage)| stage).collect()
    }

    /// First stage by the canonical ordering, if any stages exist.
    pub fn first_stage(&self) -> Option<&Stage> {
        self.stages_in_order().into_iter().next()
    }

    /// Look up a stage by its exact id.
    pub fn stage(&self, stage_id: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.id == stage_id)
    }

    /// Position of a stage in the canonical ordering.
    pub fn stage_position(&self, stage_id: &str) -> Option<usize> {
        self.stages_in_order()
            .iter()
            .position(|s| s.id == stage_id)
    }
}

/// One step within a workflow.
///
/// The stage id is the value stored on an item as its raw status, so it is
/// unique within a workflow but not globally; a raw status must always be
/// interpreted in the context of a specific workflow id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stage {
    /// Opaque stage identifier (acts as the status value stored on an item)
    pub id: String,

    /// Human-readable stage name
    pub name: String,

    /// Position in the workflow sequence
    pub order: u32,

    /// Checklist tasks for this stage
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<TaskStep>,

    /// Default staff assigned to this stage (workflow-template default;
    /// item-level assignments take precedence)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assigned_members: Vec<String>,

    /// Display color for board columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Stage {
    /// Tasks sorted by ascending `order`, ties broken by array position.
    pub fn tasks_in_order(&self) -> Vec<&TaskStep> {
        let mut tasks: Vec<(usize, &TaskStep)> = self.tasks.iter().enumerate().collect();
        tasks.sort_by_key(|(idx, task)| (task.order, *idx));
        tasks.into_iter().map(|(_, task)| task).collect()
    }
}

/// A checklist item within a stage. Owned by exactly one stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskStep {
    /// Opaque task identifier
    pub id: String,

    /// Brief title of the task
    pub title: String,

    /// Detailed description, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Completion flag (descriptive only; never gates a transition)
    #[serde(default)]
    pub completed: bool,

    /// Position of the task within the stage
    pub order: u32,
}

//! Staff and task assignment resolution.
//!
//! Assignment is descriptive in the current design: the transition engine
//! reads it to display who is responsible for a stage and how many of its
//! tasks are checked off, but neither staffing nor task completion gates a
//! stage move.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{OrderItem, Stage};

/// Per-item task assignment record: member ids keyed by task id.
pub type TaskAssignments = BTreeMap<String, Vec<String>>;

/// Resolve the staff responsible for a stage of an item.
///
/// Precedence: a non-empty item-level override for the stage id beats the
/// workflow-template default on the stage; otherwise empty.
pub fn resolve_stage_staff(item: &OrderItem, stage: &Stage) -> Vec<String> {
    if let Some(members) = item.stage_assignments.get(&stage.id) {
        if !members.is_empty() {
            return members.clone();
        }
    }
    stage.assigned_members.clone()
}

/// Checked-off vs. total task counts for a stage, for progress display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskSummary {
    pub completed: u32,
    pub total: u32,
}

/// Count a stage's completed and total tasks.
pub fn task_summary(stage: &Stage) -> TaskSummary {
    TaskSummary {
        completed: stage.tasks.iter().filter(|t| t.completed).count() as u32,
        total: stage.tasks.len() as u32,
    }
}

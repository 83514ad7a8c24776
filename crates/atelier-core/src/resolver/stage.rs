//! Raw-status normalization and per-item progress views.

use serde::{Deserialize, Serialize};

use crate::models::{OrderItem, Stage, TerminalStatus, WorkflowDefinition};
use crate::resolver::registry::ResolvedWorkflow;

/// Normalize a raw status value against a workflow.
///
/// Rules, in order:
/// 1. Terminal sentinels (including legacy localized spellings) pass
///    through unchanged; terminal statuses are never renormalized.
/// 2. Without a workflow there is no context to normalize in; the raw
///    value passes through (degraded but non-fatal, shown as "no workflow
///    configured").
/// 3. An exact stage-id match passes through.
/// 4. A case-insensitive match on stage id or name returns that stage's id
///    (data repair for inconsistent historical writes).
/// 5. Anything else resets to the workflow's first stage.
///
/// Pure function of its inputs, with no timing dependence: when the
/// registry loads late the caller simply re-derives and gets the right
/// answer. Idempotent by construction: every branch returns either the
/// input or an exact stage id, both fixed points.
pub fn normalize_status(raw: &str, workflow: Option<&WorkflowDefinition>) -> String {
    if TerminalStatus::from_raw(raw).is_some() {
        return raw.to_string();
    }

    let Some(workflow) = workflow else {
        return raw.to_string();
    };

    if workflow.stage(raw).is_some() {
        return raw.to_string();
    }

    if let Some(stage) = find_stage_lenient(workflow, raw) {
        return stage.id.clone();
    }

    match workflow.first_stage() {
        Some(first) => first.id.clone(),
        // No stages configured: nothing to reset to, pass through
        None => raw.to_string(),
    }
}

/// Case-insensitive lookup by stage id or display name.
fn find_stage_lenient<'a>(workflow: &'a WorkflowDefinition, raw: &str) -> Option<&'a Stage> {
    let needle = raw.trim();
    workflow.stages.iter().find(|s| {
        s.id.eq_ignore_ascii_case(needle) || s.name.to_lowercase() == needle.to_lowercase()
    })
}

/// True when a raw status counts as finished for sequential gating: a
/// terminal sentinel, or a stage of the item's workflow literally named
/// "Done".
pub fn is_terminal_status(raw: &str, workflow: Option<&WorkflowDefinition>) -> bool {
    if TerminalStatus::from_raw(raw).is_some() {
        return true;
    }
    workflow
        .and_then(|wf| find_stage_lenient(wf, raw))
        .is_some_and(|stage| stage.name.eq_ignore_ascii_case("done"))
}

/// One stage of a progress stepper with its completion flags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StageFlag {
    /// Stage id
    pub stage_id: String,

    /// Stage display name
    pub stage_name: String,

    /// The item has passed or finished this stage
    pub completed: bool,

    /// The item is currently in this stage
    pub current: bool,
}

/// Read-only view of where an item stands: its active workflow, normalized
/// current stage, and the full stage list with completion flags. Sufficient
/// to render a progress stepper without the UI re-deriving any resolution
/// logic.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemProgress {
    /// The item's active workflow, when one resolves
    pub workflow: Option<ResolvedWorkflow>,

    /// Normalized current status (stage id or terminal sentinel)
    pub status: String,

    /// Display name of the current stage, when the status maps to one
    pub stage_name: Option<String>,

    /// Terminal sentinel, when the item has left its workflows
    pub terminal: Option<TerminalStatus>,

    /// Ordered stages with completion flags; default columns when no
    /// workflow is configured
    pub stages: Vec<StageFlag>,
}

/// Build the progress view for an item against its resolved workflow.
pub fn item_progress(item: &OrderItem, workflow: Option<&ResolvedWorkflow>) -> ItemProgress {
    let definition = workflow.map(ResolvedWorkflow::definition);
    let status = normalize_status(&item.status, definition);
    let terminal = TerminalStatus::from_raw(&status);

    let stages = match definition {
        Some(def) => {
            let ordered = def.stages_in_order();
            let current_pos = ordered.iter().position(|s| s.id == status);
            ordered
                .iter()
                .enumerate()
                .map(|(idx, stage)| StageFlag {
                    stage_id: stage.id.clone(),
                    stage_name: stage.name.clone(),
                    completed: terminal == Some(TerminalStatus::Done)
                        || current_pos.is_some_and(|pos| idx < pos),
                    current: current_pos == Some(idx),
                })
                .collect()
        }
        None => Vec::new(),
    };

    let stage_name = definition
        .and_then(|def| def.stage(&status))
        .map(|stage| stage.name.clone());

    ItemProgress {
        workflow: workflow.cloned(),
        status,
        stage_name,
        terminal,
        stages,
    }
}

//! Stage transition engine.
//!
//! The engine validates and classifies a requested stage move for one order
//! item against the item's active workflow and its sibling items, producing
//! a [`TransitionPlan`] describing exactly what to apply. It performs no
//! I/O: the [`crate::tracker::Tracker`] projects the inputs, hands them in,
//! and applies the resulting plan (status, workflow pointer, history write,
//! activity note) as one logical step before persisting the whole order.
//!
//! Validation errors are returned synchronously before anything mutates:
//! the sequential service gate ([`gate::check_sequence_gate`]) runs first,
//! then per-move checks (backward moves need a reason, cancel drops need
//! confirmation).

use crate::error::{Result, TrackerError};
use crate::models::{OrderItem, TerminalStatus, WorkflowDefinition, CANCEL_STATUS, DONE_STATUS};
use crate::resolver::stage::normalize_status;

pub mod gate;

pub use gate::{check_sequence_gate, service_sequence, SiblingStatus};

/// Classification of a requested stage move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Target equals the current normalized stage; nothing to do
    NoOp,

    /// Move to a later stage of the same workflow (or permissive fallback
    /// for unrecognized stages)
    Forward,

    /// Move to an earlier stage; carries an operator reason
    Backward,

    /// Finished the last workflow stage and handed off into the next
    /// configured workflow of the service
    Chain,

    /// Finished with no next workflow; item rests in the `done` sentinel
    Complete,

    /// Cancel drop: the current workflow restarts from its first stage
    Restart,
}

/// A requested stage move, as invoked from the UI (a drag-and-drop event is
/// merely an invocation site).
#[derive(Debug, Clone)]
pub struct TransitionRequest<'a> {
    /// Target stage id or terminal sentinel
    pub target_status: &'a str,

    /// Operator performing the move
    pub actor: &'a str,

    /// Operator-supplied reason; required for backward moves
    pub reason: Option<&'a str>,

    /// Operator confirmed a cancel drop
    pub confirmed: bool,
}

/// The validated outcome of classification: everything the caller needs to
/// apply the move to the item and its history ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionPlan {
    /// How the move was classified
    pub kind: TransitionKind,

    /// New raw status for the item
    pub status: String,

    /// New active workflow id, when the move chains into the next workflow
    pub workflow_id: Option<String>,

    /// Stage to open in the history ledger; `None` when the move only
    /// closes history (terminal drops without a restart target)
    pub stage_id: Option<String>,

    /// Denormalized display name for the ledger entry
    pub stage_name: Option<String>,

    /// Reason to record on the new ledger entry
    pub reason: Option<String>,

    /// Human-readable note for the activity log
    pub note: String,
}

/// Validate and classify a requested move.
///
/// `workflow` is the item's currently active workflow (absent when none
/// resolves), `next_workflow` the next one in the service's configured
/// sequence (only consulted for terminal `done` drops), and `siblings` the
/// projection of all non-product items of the same order for the
/// sequential service gate.
pub fn plan_transition(
    item: &OrderItem,
    request: &TransitionRequest<'_>,
    workflow: Option<&WorkflowDefinition>,
    next_workflow: Option<&WorkflowDefinition>,
    siblings: &[SiblingStatus],
) -> Result<TransitionPlan> {
    check_sequence_gate(item.service_id, siblings)?;

    if let Some(terminal) = TerminalStatus::from_raw(request.target_status) {
        return match terminal {
            TerminalStatus::Done => plan_done_drop(item, next_workflow),
            TerminalStatus::Cancelled => plan_cancel_drop(item, request, workflow),
        };
    }

    plan_stage_move(item, request, workflow)
}

/// Terminal `done` drop: chain into the service's next configured workflow
/// when one exists with at least one stage, otherwise complete the item.
fn plan_done_drop(
    item: &OrderItem,
    next_workflow: Option<&WorkflowDefinition>,
) -> Result<TransitionPlan> {
    if let Some(next) = next_workflow {
        if let Some(first) = next.first_stage() {
            // Forward-only hand-off; no reason required
            return Ok(TransitionPlan {
                kind: TransitionKind::Chain,
                status: first.id.clone(),
                workflow_id: Some(next.id.clone()),
                stage_id: Some(first.id.clone()),
                stage_name: Some(first.name.clone()),
                reason: None,
                note: format!(
                    "{} moved on to workflow '{}' at stage '{}'",
                    item.name, next.label, first.name
                ),
            });
        }
    }

    Ok(TransitionPlan {
        kind: TransitionKind::Complete,
        status: DONE_STATUS.to_string(),
        workflow_id: None,
        stage_id: None,
        stage_name: None,
        reason: None,
        note: format!("{} completed", item.name),
    })
}

/// Terminal `cancel` drop: restart the current workflow from its first
/// stage. Requires operator confirmation; the reason is optional.
fn plan_cancel_drop(
    item: &OrderItem,
    request: &TransitionRequest<'_>,
    workflow: Option<&WorkflowDefinition>,
) -> Result<TransitionPlan> {
    if !request.confirmed {
        return Err(TrackerError::ConfirmationRequired);
    }

    let reason = trimmed_reason(request.reason);

    if let Some(first) = workflow.and_then(WorkflowDefinition::first_stage) {
        return Ok(TransitionPlan {
            kind: TransitionKind::Restart,
            status: first.id.clone(),
            workflow_id: None,
            stage_id: Some(first.id.clone()),
            stage_name: Some(first.name.clone()),
            reason: reason.clone(),
            note: format!("{} restarted at stage '{}'", item.name, first.name),
        });
    }

    // No workflow to restart into; rest in the cancel sentinel
    Ok(TransitionPlan {
        kind: TransitionKind::Restart,
        status: CANCEL_STATUS.to_string(),
        workflow_id: None,
        stage_id: None,
        stage_name: None,
        reason,
        note: format!("{} cancelled (no workflow to restart)", item.name),
    })
}

/// Ordinary stage-to-stage move within the active workflow.
fn plan_stage_move(
    item: &OrderItem,
    request: &TransitionRequest<'_>,
    workflow: Option<&WorkflowDefinition>,
) -> Result<TransitionPlan> {
    let current = normalize_status(&item.status, workflow);
    let target = request.target_status;

    if target == current {
        return Ok(TransitionPlan {
            kind: TransitionKind::NoOp,
            status: current,
            workflow_id: None,
            stage_id: None,
            stage_name: None,
            reason: None,
            note: format!("{} already in place", item.name),
        });
    }

    let positions = workflow.and_then(|wf| {
        let current_pos = wf.stage_position(&current)?;
        let target_pos = wf.stage_position(target)?;
        let stage = wf.stage(target)?;
        Some((stage, current_pos, target_pos))
    });

    match positions {
        Some((stage, current_pos, target_pos)) if target_pos < current_pos => {
            // Backward moves need an operator reason on record
            let Some(reason) = trimmed_reason(request.reason) else {
                return Err(TrackerError::ReasonRequired);
            };
            Ok(TransitionPlan {
                kind: TransitionKind::Backward,
                status: stage.id.clone(),
                workflow_id: None,
                stage_id: Some(stage.id.clone()),
                stage_name: Some(stage.name.clone()),
                reason: Some(reason),
                note: format!("{} moved back to '{}'", item.name, stage.name),
            })
        }
        Some((stage, _, _)) => {
            Ok(TransitionPlan {
                kind: TransitionKind::Forward,
                status: stage.id.clone(),
                workflow_id: None,
                stage_id: Some(stage.id.clone()),
                stage_name: Some(stage.name.clone()),
                reason: None,
                note: format!("{} moved to '{}'", item.name, stage.name),
            })
        }
        None => {
            // Current or target stage does not resolve against the active
            // view (legacy data, stale column set): permissive forward
            // rather than blocking the operator.
            let stage_name = workflow
                .and_then(|wf| wf.stage(target))
                .map(|s| s.name.clone());
            Ok(TransitionPlan {
                kind: TransitionKind::Forward,
                status: target.to_string(),
                workflow_id: None,
                stage_id: Some(target.to_string()),
                stage_name: stage_name.clone(),
                reason: None,
                note: format!(
                    "{} moved to '{}'",
                    item.name,
                    stage_name.unwrap_or_else(|| target.to_string())
                ),
            })
        }
    }
}

fn trimmed_reason(reason: Option<&str>) -> Option<String> {
    reason
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(String::from)
}

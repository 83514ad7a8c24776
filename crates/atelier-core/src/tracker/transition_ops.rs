//! Stage transition operations for the Tracker.
//!
//! `move_item` is the single entry point for every stage move (board
//! drag-and-drop, progress stepper clicks, terminal drops), wired as:
//! project the pure inputs (active workflow, next workflow, sibling gate
//! statuses), classify through [`crate::engine::plan_transition`], apply
//! the plan to the item matched by identity, write the history ledger, and
//! persist the whole order as one transaction. Validation rejections
//! surface before any I/O and leave no state mutated.

use jiff::Timestamp;

use super::Tracker;
use crate::{
    activity::ActivityLevel,
    engine::{self, SiblingStatus, TransitionKind, TransitionRequest},
    error::{Result, TrackerError},
    ledger,
    models::{ItemKind, Order, OrderItem, ServiceCatalogItem},
    params::MoveItem,
    resolver::{
        catalog::{next_workflow_ref, resolve_workflow_refs, ServiceCatalog},
        registry::{resolve_item_workflow, resolve_workflow, ResolvedWorkflow, WorkflowRegistry},
        stage::is_terminal_status,
    },
};

/// The applied result of a stage move, for display and follow-up reads.
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    /// Order the item belongs to
    pub order_id: u64,

    /// The item after the move
    pub item: OrderItem,

    /// How the move was classified
    pub kind: TransitionKind,

    /// Human-readable note, also recorded in the activity log
    pub note: String,
}

impl Tracker {
    /// Validates and applies a stage move for one order item.
    ///
    /// No-op moves return without touching history or storage. Gate and
    /// reason/confirmation rejections are returned synchronously with
    /// nothing mutated. Persistence failures propagate to the caller; the
    /// next read re-derives from the stored snapshot.
    pub async fn move_item(&self, params: &MoveItem) -> Result<TransitionOutcome> {
        let registry = self.refreshed_registry().await?;
        let catalog = self.refreshed_catalog().await?;

        let order_id = params.order_id;
        let Some(mut order) = self
            .with_db(move |db| db.get_order(order_id))
            .await?
        else {
            return Err(TrackerError::OrderNotFound { id: params.order_id });
        };

        let Some(item) = order.item(params.item_id).cloned() else {
            return Err(TrackerError::ItemNotFound { id: params.item_id });
        };

        let service = item.service_id.and_then(|id| catalog.get(id)).cloned();
        let workflow = resolve_item_workflow(&registry, service.as_ref(), &item);
        let next_workflow = service
            .as_ref()
            .and_then(|svc| resolve_next_workflow(&registry, svc, &item));
        let siblings = sibling_statuses(&order, &registry, &catalog);

        let request = TransitionRequest {
            target_status: &params.target_status,
            actor: &params.actor,
            reason: params.reason.as_deref(),
            confirmed: params.confirmed,
        };

        let plan = engine::plan_transition(
            &item,
            &request,
            workflow.as_ref().map(ResolvedWorkflow::definition),
            next_workflow.as_ref().map(ResolvedWorkflow::definition),
            &siblings,
        )?;

        if plan.kind == TransitionKind::NoOp {
            return Ok(TransitionOutcome {
                order_id: order.id,
                item,
                kind: plan.kind,
                note: plan.note,
            });
        }

        // Apply the plan to the item matched by identity, then persist the
        // whole order; local mutation and the store write form one logical
        // step; a failed write leaves the stored snapshot authoritative.
        let now = Timestamp::now();
        {
            let Some(target) = order.item_mut(params.item_id) else {
                return Err(TrackerError::ItemNotFound { id: params.item_id });
            };
            target.status = plan.status.clone();
            if let Some(workflow_id) = &plan.workflow_id {
                target.workflow_id = Some(workflow_id.clone());
            }
            match (&plan.stage_id, &plan.stage_name) {
                (Some(stage_id), stage_name) => ledger::append_transition(
                    &mut target.history,
                    stage_id,
                    stage_name.as_deref().unwrap_or(stage_id),
                    &params.actor,
                    plan.reason.as_deref(),
                    now,
                ),
                (None, _) => ledger::close_open_entry(&mut target.history, now),
            }
        }

        let persisted = order.clone();
        self.with_db(move |db| db.update_order(&persisted)).await?;

        let level = match plan.kind {
            TransitionKind::Restart => {
                log::warn!("{}", plan.note);
                ActivityLevel::Warning
            }
            _ => {
                log::info!("{}", plan.note);
                ActivityLevel::Info
            }
        };
        self.activity
            .lock()
            .await
            .record(level, &params.actor, &plan.note, now);

        let item = order
            .item(params.item_id)
            .cloned()
            .ok_or(TrackerError::ItemNotFound { id: params.item_id })?;

        Ok(TransitionOutcome {
            order_id: order.id,
            item,
            kind: plan.kind,
            note: plan.note,
        })
    }
}

/// The next workflow in the item's service sequence, resolved to a
/// definition. Consulted only for terminal `done` drops.
fn resolve_next_workflow(
    registry: &WorkflowRegistry,
    service: &ServiceCatalogItem,
    item: &OrderItem,
) -> Option<ResolvedWorkflow> {
    let current_id = item.workflow_id.as_deref()?;
    let refs = resolve_workflow_refs(service);
    let next = next_workflow_ref(&refs, current_id)?;
    resolve_workflow(registry, Some(service), &next.workflow_id)
}

/// Project the order's service items into gate inputs: service link plus
/// whether each item already counts as finished in its own workflow.
fn sibling_statuses(
    order: &Order,
    registry: &WorkflowRegistry,
    catalog: &ServiceCatalog,
) -> Vec<SiblingStatus> {
    order
        .items
        .iter()
        .filter(|item| item.kind == ItemKind::Service)
        .map(|item| {
            let service = item.service_id.and_then(|id| catalog.get(id));
            let workflow = resolve_item_workflow(registry, service, item);
            let service_name = service
                .map(|svc| svc.name.clone())
                .unwrap_or_else(|| item.name.clone());
            SiblingStatus {
                item_id: item.id,
                service_id: item.service_id,
                service_name,
                terminal: is_terminal_status(
                    &item.status,
                    workflow.as_ref().map(ResolvedWorkflow::definition),
                ),
            }
        })
        .collect()
}

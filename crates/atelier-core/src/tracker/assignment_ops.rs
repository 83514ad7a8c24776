//! Staff and task assignment operations for the Tracker.

use super::Tracker;
use crate::{
    error::{Result, TrackerError},
    params::{AssignTask, ItemRef},
    resolver::{registry::resolve_item_workflow, stage},
    staffing::{self, TaskAssignments},
};

impl Tracker {
    /// Upserts the member list for one task of an item. A zero item id
    /// means the item has not been persisted yet; the call is a no-op and
    /// never reaches storage.
    pub async fn set_task_assignment(&self, params: &AssignTask) -> Result<()> {
        if params.item_id == 0 {
            return Ok(());
        }

        let item_id = params.item_id;
        let task_id = params.task_id.clone();
        let member_ids = params.member_ids.clone();

        self.with_db(move |db| db.set_task_assignment(item_id, &task_id, &member_ids))
            .await
    }

    /// Retrieves all task assignments for an item, keyed by task id.
    pub async fn get_task_assignments(&self, params: &crate::params::Id) -> Result<TaskAssignments> {
        let item_id = params.id;
        self.with_db(move |db| db.get_task_assignments(item_id))
            .await
    }

    /// Resolves the staff responsible for an item's current stage:
    /// item-level override first, then the workflow-template default.
    pub async fn stage_staff(&self, params: &ItemRef) -> Result<Vec<String>> {
        let registry = self.refreshed_registry().await?;
        let catalog = self.refreshed_catalog().await?;

        let order_id = params.order_id;
        let Some(order) = self.with_db(move |db| db.get_order(order_id)).await? else {
            return Err(TrackerError::OrderNotFound { id: params.order_id });
        };
        let Some(item) = order.item(params.item_id) else {
            return Err(TrackerError::ItemNotFound { id: params.item_id });
        };

        let service = item.service_id.and_then(|id| catalog.get(id));
        let workflow = resolve_item_workflow(&registry, service, item);
        let Some(workflow) = workflow else {
            return Ok(item.assigned_members.clone());
        };

        let status = stage::normalize_status(&item.status, Some(workflow.definition()));
        match workflow.definition().stage(&status) {
            Some(current) => Ok(staffing::resolve_stage_staff(item, current)),
            None => Ok(item.assigned_members.clone()),
        }
    }
}

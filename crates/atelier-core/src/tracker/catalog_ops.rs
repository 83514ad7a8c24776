//! Workflow registry and service catalog operations for the Tracker.

use super::Tracker;
use crate::{
    error::Result,
    models::{ServiceCatalogItem, WorkflowDefinition},
    params::{CreateService, CreateWorkflow, SetTaskDone},
};

impl Tracker {
    /// Registers (or replaces) a workflow definition and invalidates the
    /// caches so resolution sees it immediately.
    pub async fn add_workflow(&self, params: &CreateWorkflow) -> Result<WorkflowDefinition> {
        let workflow = WorkflowDefinition {
            id: params.id.clone(),
            label: params.label.clone(),
            department: params.department.clone(),
            stages: params.stages.clone(),
            service_types: vec![],
            assigned_members: vec![],
        };

        let stored = workflow.clone();
        self.with_db(move |db| db.upsert_workflow(&stored)).await?;
        self.invalidate_caches().await;

        Ok(workflow)
    }

    /// Lists all workflow definitions through the registry cache.
    pub async fn list_workflows(&self) -> Result<Vec<WorkflowDefinition>> {
        Ok(self.refreshed_registry().await?.all().to_vec())
    }

    /// Creates a service catalog entry and invalidates the caches.
    pub async fn add_service(&self, params: &CreateService) -> Result<ServiceCatalogItem> {
        let name = params.name.clone();
        let price = params.price;
        let workflows = params.workflows.clone();

        let service = self
            .with_db(move |db| db.create_service(&name, price, &workflows, None))
            .await?;
        self.invalidate_caches().await;

        Ok(service)
    }

    /// Lists all service catalog entries through the catalog cache.
    pub async fn list_services(&self) -> Result<Vec<ServiceCatalogItem>> {
        Ok(self.refreshed_catalog().await?.all().to_vec())
    }

    /// Checks a workflow stage task on or off. Descriptive only: task
    /// completion never gates a stage transition.
    pub async fn set_task_done(&self, params: &SetTaskDone) -> Result<()> {
        let workflow_id = params.workflow_id.clone();
        let stage_id = params.stage_id.clone();
        let task_id = params.task_id.clone();
        let completed = params.completed;

        self.with_db(move |db| {
            db.set_task_completed(&workflow_id, &stage_id, &task_id, completed)
        })
        .await?;
        self.invalidate_caches().await;

        Ok(())
    }
}

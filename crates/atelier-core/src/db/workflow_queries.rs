//! Workflow registry queries.
//!
//! Workflow definitions are authored by the workflow-builder surface and
//! read-only for the rest of the system; the tracker loads them into the
//! registry cache. The one mutation offered besides upsert is toggling a
//! stage task's completion flag, which is descriptive bookkeeping and
//! never gates a transition.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    error::{Result, TrackerError},
    models::WorkflowDefinition,
};

const UPSERT_WORKFLOW_SQL: &str = "INSERT INTO workflows (id, label, department, stages, service_types, assigned_members, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7) ON CONFLICT(id) DO UPDATE SET label = ?2, department = ?3, stages = ?4, service_types = ?5, assigned_members = ?6, updated_at = ?7";
const SELECT_WORKFLOW_SQL: &str = "SELECT id, label, department, stages, service_types, assigned_members FROM workflows WHERE id = ?1";
const SELECT_WORKFLOWS_SQL: &str = "SELECT id, label, department, stages, service_types, assigned_members FROM workflows ORDER BY id";

impl super::Database {
    fn build_workflow_from_row(row: &rusqlite::Row) -> rusqlite::Result<WorkflowDefinition> {
        let stages_raw: String = row.get(3)?;
        let service_types_raw: String = row.get(4)?;
        let assigned_members_raw: String = row.get(5)?;

        Ok(WorkflowDefinition {
            id: row.get(0)?,
            label: row.get(1)?,
            department: row.get(2)?,
            stages: serde_json::from_str(&stages_raw).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e))
            })?,
            service_types: serde_json::from_str(&service_types_raw).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e))
            })?,
            assigned_members: serde_json::from_str(&assigned_members_raw).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e))
            })?,
        })
    }

    /// Inserts or replaces a workflow definition.
    pub fn upsert_workflow(&mut self, workflow: &WorkflowDefinition) -> Result<()> {
        let now_str = Timestamp::now().to_string();

        self.connection
            .execute(
                UPSERT_WORKFLOW_SQL,
                params![
                    &workflow.id,
                    &workflow.label,
                    workflow.department.as_deref(),
                    serde_json::to_string(&workflow.stages)?,
                    serde_json::to_string(&workflow.service_types)?,
                    serde_json::to_string(&workflow.assigned_members)?,
                    &now_str
                ],
            )
            .map_err(|e| TrackerError::database_error("Failed to upsert workflow", e))?;

        Ok(())
    }

    /// Retrieves a workflow definition by id.
    pub fn get_workflow(&self, workflow_id: &str) -> Result<Option<WorkflowDefinition>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_WORKFLOW_SQL)
            .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;

        let workflow = stmt
            .query_row(params![workflow_id], Self::build_workflow_from_row)
            .optional()
            .map_err(|e| TrackerError::database_error("Failed to query workflow", e))?;

        Ok(workflow)
    }

    /// Lists all workflow definitions.
    pub fn list_workflows(&self) -> Result<Vec<WorkflowDefinition>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_WORKFLOWS_SQL)
            .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;

        let workflows = stmt
            .query_map([], Self::build_workflow_from_row)
            .map_err(|e| TrackerError::database_error("Failed to query workflows", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| TrackerError::database_error("Failed to fetch workflows", e))?;

        Ok(workflows)
    }

    /// Toggles the completion flag of one task within a workflow stage.
    pub fn set_task_completed(
        &mut self,
        workflow_id: &str,
        stage_id: &str,
        task_id: &str,
        completed: bool,
    ) -> Result<()> {
        let Some(mut workflow) = self.get_workflow(workflow_id)? else {
            return Err(TrackerError::WorkflowNotFound {
                id: workflow_id.to_string(),
            });
        };

        let task = workflow
            .stages
            .iter_mut()
            .find(|s| s.id == stage_id)
            .and_then(|stage| stage.tasks.iter_mut().find(|t| t.id == task_id));

        let Some(task) = task else {
            return Err(TrackerError::invalid_input(
                "task_id",
                format!("No task '{task_id}' in stage '{stage_id}' of workflow '{workflow_id}'"),
            ));
        };

        task.completed = completed;
        self.upsert_workflow(&workflow)
    }
}

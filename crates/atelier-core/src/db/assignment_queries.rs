//! Per-item task assignment queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type};

use crate::{
    error::{Result, TrackerError},
    staffing::TaskAssignments,
};

const UPSERT_TASK_ASSIGNMENT_SQL: &str = "INSERT INTO task_assignments (item_id, task_id, member_ids, updated_at) VALUES (?1, ?2, ?3, ?4) ON CONFLICT(item_id, task_id) DO UPDATE SET member_ids = ?3, updated_at = ?4";
const SELECT_TASK_ASSIGNMENTS_SQL: &str =
    "SELECT task_id, member_ids FROM task_assignments WHERE item_id = ?1";

impl super::Database {
    /// Upserts the member list for one task of an item without touching
    /// other tasks' assignments.
    ///
    /// A zero item id means the item has not been persisted yet; the call
    /// is a no-op so half-created order drafts never leak assignment rows.
    pub fn set_task_assignment(
        &mut self,
        item_id: u64,
        task_id: &str,
        member_ids: &[String],
    ) -> Result<()> {
        if item_id == 0 {
            return Ok(());
        }

        let now_str = Timestamp::now().to_string();

        self.connection
            .execute(
                UPSERT_TASK_ASSIGNMENT_SQL,
                params![
                    item_id as i64,
                    task_id,
                    serde_json::to_string(member_ids)?,
                    &now_str
                ],
            )
            .map_err(|e| TrackerError::database_error("Failed to upsert task assignment", e))?;

        Ok(())
    }

    /// Retrieves all task assignments for an item, keyed by task id.
    pub fn get_task_assignments(&self, item_id: u64) -> Result<TaskAssignments> {
        let mut stmt = self
            .connection
            .prepare(SELECT_TASK_ASSIGNMENTS_SQL)
            .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;

        let rows = stmt
            .query_map(params![item_id as i64], |row| {
                let task_id: String = row.get(0)?;
                let members_raw: String = row.get(1)?;
                let members: Vec<String> = serde_json::from_str(&members_raw).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e))
                })?;
                Ok((task_id, members))
            })
            .map_err(|e| TrackerError::database_error("Failed to query task assignments", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| TrackerError::database_error("Failed to fetch task assignments", e))?;

        Ok(rows.into_iter().collect())
    }
}

//! Service catalog queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    error::{Result, TrackerError},
    models::{LegacyWorkflowId, ServiceCatalogItem, WorkflowRef},
};

const INSERT_SERVICE_SQL: &str = "INSERT INTO services (name, price, workflow_refs, legacy_workflow_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5)";
const SELECT_SERVICE_SQL: &str =
    "SELECT id, name, price, workflow_refs, legacy_workflow_id FROM services WHERE id = ?1";
const SELECT_SERVICES_SQL: &str =
    "SELECT id, name, price, workflow_refs, legacy_workflow_id FROM services ORDER BY id";

impl super::Database {
    fn build_service_from_row(row: &rusqlite::Row) -> rusqlite::Result<ServiceCatalogItem> {
        let refs_raw: String = row.get(3)?;
        let workflows: Vec<WorkflowRef> = serde_json::from_str(&refs_raw)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

        // Legacy pointer column holds either a bare JSON string or a JSON
        // array; the untagged enum sorts out which shape was written.
        let legacy_raw: Option<String> = row.get(4)?;
        let legacy_workflow_id = legacy_raw
            .map(|raw| {
                serde_json::from_str::<LegacyWorkflowId>(&raw).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e))
                })
            })
            .transpose()?;

        Ok(ServiceCatalogItem {
            id: row.get::<_, i64>(0)? as u64,
            name: row.get(1)?,
            price: row.get(2)?,
            workflows,
            legacy_workflow_id,
        })
    }

    /// Creates a new service catalog entry.
    pub fn create_service(
        &mut self,
        name: &str,
        price: i64,
        workflows: &[WorkflowRef],
        legacy_workflow_id: Option<&LegacyWorkflowId>,
    ) -> Result<ServiceCatalogItem> {
        let now_str = Timestamp::now().to_string();

        let legacy_json = legacy_workflow_id
            .map(serde_json::to_string)
            .transpose()?;

        self.connection
            .execute(
                INSERT_SERVICE_SQL,
                params![
                    name,
                    price,
                    serde_json::to_string(workflows)?,
                    legacy_json.as_deref(),
                    &now_str
                ],
            )
            .map_err(|e| TrackerError::database_error("Failed to insert service", e))?;

        let id = self.connection.last_insert_rowid() as u64;

        Ok(ServiceCatalogItem {
            id,
            name: name.into(),
            price,
            workflows: workflows.to_vec(),
            legacy_workflow_id: legacy_workflow_id.cloned(),
        })
    }

    /// Retrieves a service catalog entry by id.
    pub fn get_service(&self, id: u64) -> Result<Option<ServiceCatalogItem>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_SERVICE_SQL)
            .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;

        let service = stmt
            .query_row(params![id as i64], Self::build_service_from_row)
            .optional()
            .map_err(|e| TrackerError::database_error("Failed to query service", e))?;

        Ok(service)
    }

    /// Lists all service catalog entries.
    pub fn list_services(&self) -> Result<Vec<ServiceCatalogItem>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_SERVICES_SQL)
            .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;

        let services = stmt
            .query_map([], Self::build_service_from_row)
            .map_err(|e| TrackerError::database_error("Failed to query services", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| TrackerError::database_error("Failed to fetch services", e))?;

        Ok(services)
    }
}

//! High-level tracker API for orders and stage transitions.
//!
//! This module provides the main [`Tracker`] interface of the Atelier job
//! tracking system. The tracker acts as the central coordinator between the
//! interface layers and the database, wiring the pure resolution and
//! transition logic to the record store:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────────┐    ┌─────────────────┐
//! │   Operations    │    │   Pure core         │    │    Database     │
//! │ (order_ops,     │───▶│ (resolver, engine,  │───▶│   (via db/)     │
//! │  transition_ops)│    │  ledger, staffing)  │    │                 │
//! └─────────────────┘    └─────────────────────┘    └─────────────────┘
//!   Interface facade       Synchronous logic          Persistence
//! ```
//!
//! All validation is synchronous and runs before any I/O; only the final
//! persistence write suspends (blocking SQLite wrapped in
//! `tokio::task::spawn_blocking`, as one logical step per operation: last
//! write wins, no partial-item persistence). The workflow registry and
//! service catalog are TTL-bounded caches owned by the tracker and
//! refreshed from the store on access; the session-scoped activity log is
//! owned here too. All three are explicit injectable state, constructed in
//! [`TrackerBuilder`], so tests can control staleness deterministically.

use std::path::PathBuf;

use jiff::Timestamp;
use tokio::sync::Mutex;
use tokio::task;

use crate::{
    activity::ActivityLog,
    db::Database,
    error::{Result, TrackerError},
    models::{ServiceCatalogItem, WorkflowDefinition},
    resolver::{catalog::ServiceCatalog, registry::WorkflowRegistry},
};

// Module declarations
pub mod assignment_ops;
pub mod builder;
pub mod catalog_ops;
pub mod order_ops;
pub mod transition_ops;
pub mod views;


// Re-export the main types
pub use builder::TrackerBuilder;
pub use transition_ops::TransitionOutcome;
pub use views::{BoardCard, BoardColumn};

/// Main tracker interface for orders, workflows, and transitions.
pub struct Tracker {
    pub(crate) db_path: PathBuf,
    pub(crate) registry: Mutex<WorkflowRegistry>,
    pub(crate) catalog: Mutex<ServiceCatalog>,
    pub(crate) activity: Mutex<ActivityLog>,
}

impl Tracker {
    /// Creates a new tracker with the given database path and caches.
    pub(crate) fn new(
        db_path: PathBuf,
        registry: WorkflowRegistry,
        catalog: ServiceCatalog,
        activity: ActivityLog,
    ) -> Self {
        Self {
            db_path,
            registry: Mutex::new(registry),
            catalog: Mutex::new(catalog),
            activity: Mutex::new(activity),
        }
    }

    /// Run a blocking database closure on the blocking thread pool.
    pub(crate) async fn with_db<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            f(&mut db)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Snapshot of the workflow registry, refreshed from the store when the
    /// cache is stale. A failing refresh surfaces the error; an empty store
    /// is a valid (degraded) state.
    pub(crate) async fn refreshed_registry(&self) -> Result<WorkflowRegistry> {
        let now = Timestamp::now();
        {
            let registry = self.registry.lock().await;
            if !registry.is_stale(now) {
                return Ok(registry.clone());
            }
        }

        let workflows: Vec<WorkflowDefinition> =
            self.with_db(|db| db.list_workflows()).await?;

        let mut registry = self.registry.lock().await;
        registry.replace(workflows, now);
        Ok(registry.clone())
    }

    /// Snapshot of the service catalog, refreshed when stale.
    pub(crate) async fn refreshed_catalog(&self) -> Result<ServiceCatalog> {
        let now = Timestamp::now();
        {
            let catalog = self.catalog.lock().await;
            if !catalog.is_stale(now) {
                return Ok(catalog.clone());
            }
        }

        let services: Vec<ServiceCatalogItem> =
            self.with_db(|db| db.list_services()).await?;

        let mut catalog = self.catalog.lock().await;
        catalog.replace(services, now);
        Ok(catalog.clone())
    }

    /// Drop both caches so the next access reloads from the store.
    pub(crate) async fn invalidate_caches(&self) {
        self.registry.lock().await.invalidate();
        self.catalog.lock().await.invalidate();
    }
}

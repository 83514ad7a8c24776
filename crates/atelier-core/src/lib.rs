//! Core library for the Atelier job tracking application.
//!
//! Atelier tracks repair-and-spa orders whose service items move through
//! configurable multi-stage workflows (intake → cleaning → repair → QC →
//! done). This crate provides the core business logic: workflow and stage
//! resolution, the transition engine with its sequential service gate and
//! workflow chaining, the append-only history ledger, staff/task
//! assignment, and the SQLite-backed record store behind the [`Tracker`]
//! facade.
//!
//! # Architecture
//!
//! The pure layers ([`resolver`], [`engine`], [`ledger`], [`staffing`])
//! compute over the typed models in [`models`] and never touch storage;
//! the [`tracker`] coordinator projects their inputs from the record store,
//! applies their outputs, and persists whole orders as single transactions.
//! Workflow definitions and the service catalog are read-mostly TTL caches
//! owned by the tracker; all status interpretation is a pure re-derivation
//! so late cache loads simply yield correct answers on the next call.
//!
//! # Quick Start
//!
//! ```rust
//! use atelier_core::{TrackerBuilder, params::{CreateOrder, CreateService}};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a tracker instance
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some("atelier.db"))
//!     .build()
//!     .await?;
//!
//! // Register a service and take an order for it
//! let service = tracker.add_service(&CreateService {
//!     name: "Deep Clean".to_string(),
//!     price: 150_000,
//!     workflows: vec![],
//! }).await?;
//!
//! let order = tracker.create_order(&CreateOrder {
//!     customer: Some("Linh".to_string()),
//!     note: None,
//!     services: vec![service.id],
//!     products: vec![],
//!     actor: Some("an".to_string()),
//! }).await?;
//! println!("Created order: {}", order.id);
//! # Ok(())
//! # }
//! ```

pub mod activity;
pub mod db;
pub mod display;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod models;
pub mod params;
pub mod resolver;
pub mod staffing;
pub mod tracker;

// Re-export commonly used types
pub use activity::{ActivityEvent, ActivityLevel, ActivityLog};
pub use db::Database;
pub use display::{
    ActivityEvents, Board, CreateResult, HistoryEntries, OperationStatus, OrderSummaries,
    Services, TransitionResult, Workflows,
};
pub use engine::{SiblingStatus, TransitionKind, TransitionPlan, TransitionRequest};
pub use error::{Result, TrackerError};
pub use models::{
    ItemKind, Order, OrderItem, OrderSummary, ServiceCatalogItem, Stage, StageEntry, TaskStep,
    TerminalStatus, WorkflowDefinition, WorkflowRef,
};
pub use resolver::{ItemProgress, ResolvedWorkflow, WorkflowRegistry};
pub use tracker::{Tracker, TrackerBuilder, TransitionOutcome};

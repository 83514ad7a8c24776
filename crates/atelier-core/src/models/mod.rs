//! Data models for orders, workflows, and the service catalog.
//!
//! This module contains the core domain models of the Atelier job tracking
//! system. Display implementations for these models live in
//! [`crate::display::models`] to maintain clean separation between data
//! structures and presentation logic.
//!
//! # Model Overview
//!
//! - [`WorkflowDefinition`]: an ordered sequence of [`Stage`]s, each with an
//!   optional task checklist and default staff. Read-only at the core's
//!   boundary; the core resolves against definitions but never edits them.
//! - [`ServiceCatalogItem`]: a sellable service carrying an ordered list of
//!   [`WorkflowRef`]s. The ref ordering drives workflow chaining when an item
//!   finishes the last stage of its current workflow.
//! - [`Order`] / [`OrderItem`]: the mutable side. The core owns an item's
//!   `status`, `workflow_id`, and `history` and mutates them only through
//!   stage transitions.
//! - [`StageEntry`]: one row of the append-only history ledger. At most one
//!   entry is open (no `left_at`) at any time, and its `stage_id` equals the
//!   item's current normalized status.
//! - [`TerminalStatus`]: the `done`/`cancel` sentinels that live outside any
//!   workflow's stage list, including their legacy localized spellings.

pub mod catalog;
pub mod history;
pub mod order;
pub mod status;
pub mod summary;
pub mod workflow;

#[cfg(test)]
mod tests;

// Re-export all public types at the models level for backward compatibility
pub use catalog::{LegacyWorkflowId, ServiceCatalogItem, WorkflowRef};
pub use history::StageEntry;
pub use order::{ItemKind, Order, OrderItem};
pub use status::{TerminalStatus, CANCEL_STATUS, DONE_STATUS};
pub use summary::OrderSummary;
pub use workflow::{Stage, TaskStep, WorkflowDefinition};

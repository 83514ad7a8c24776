//! Order and order item models.

use std::collections::BTreeMap;
use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{StageEntry, TerminalStatus, DONE_STATUS};

/// A customer order holding service and product line items.
///
/// Orders are created by the order-entry flow and mutated only through
/// item-level stage transitions and whole-order edits; the core never
/// deletes them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique identifier for the order
    pub id: u64,

    /// Customer reference (free text; customer management is out of scope)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,

    /// Free-text note attached at order entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Line items in entry order
    #[serde(default)]
    pub items: Vec<OrderItem>,

    /// Timestamp when the order was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the order was last modified (UTC)
    pub updated_at: Timestamp,
}

impl Order {
    /// Look up an item by id.
    pub fn item(&self, item_id: u64) -> Option<&OrderItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Mutable item lookup by id; transitions apply to the specific item
    /// matched by identity within the order's item array.
    pub fn item_mut(&mut self, item_id: u64) -> Option<&mut OrderItem> {
        self.items.iter_mut().find(|i| i.id == item_id)
    }

    /// Service items in entry order (products carry no workflow and are
    /// excluded from gating and board views).
    pub fn service_items(&self) -> Vec<&OrderItem> {
        self.items
            .iter()
            .filter(|i| i.kind == ItemKind::Service)
            .collect()
    }
}

/// Line item type: a tracked service or a retail product.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Tracked through a workflow
    Service,

    /// Retail product; born in the `done` sentinel with no workflow
    Product,
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "service" => Ok(ItemKind::Service),
            "product" => Ok(ItemKind::Product),
            _ => Err(format!("Invalid item kind: {s}")),
        }
    }
}

impl ItemKind {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Service => "service",
            ItemKind::Product => "product",
        }
    }
}

/// One line item of an order.
///
/// `status` holds a raw value: a stage id of the active workflow, a terminal
/// sentinel, or (for legacy data) a free-text keyword that the stage
/// resolver normalizes on read. `workflow_id` is a denormalized pointer to
/// the currently active workflow and may lag the catalog if the catalog
/// changed after order creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Unique identifier for the item
    pub id: u64,

    /// Item name (denormalized from the catalog at entry time)
    pub name: String,

    /// Service or product
    pub kind: ItemKind,

    /// Unit price in minor currency units
    pub price: i64,

    /// Quantity ordered
    pub quantity: u32,

    /// Raw status value (stage id, terminal sentinel, or legacy keyword)
    pub status: String,

    /// Link to the service catalog for workflow resolution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<u64>,

    /// Currently active workflow for this item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<String>,

    /// Append-only stage history ledger
    #[serde(default)]
    pub history: Vec<StageEntry>,

    /// Per-item staff overrides keyed by stage id (beats the workflow
    /// template default)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub stage_assignments: BTreeMap<String, Vec<String>>,

    /// Staff assigned to the item as a whole
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assigned_members: Vec<String>,

    /// Commission amounts keyed by member id
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub commissions: BTreeMap<String, i64>,

    /// Free-text technician notes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub technical_log: Vec<String>,
}

impl OrderItem {
    /// True when the raw status is one of the terminal sentinels.
    pub fn is_terminal(&self) -> bool {
        TerminalStatus::from_raw(&self.status).is_some()
    }

    /// True for items that finished all configured workflows.
    pub fn is_done(&self) -> bool {
        TerminalStatus::from_raw(&self.status) == Some(TerminalStatus::Done)
    }

    /// Initial raw status for a brand-new item of the given kind: products
    /// are born done, services enter their first resolved stage (set by the
    /// order-entry flow after workflow resolution).
    pub fn initial_product_status() -> String {
        DONE_STATUS.to_string()
    }

    /// Line total in minor currency units.
    pub fn line_total(&self) -> i64 {
        self.price * i64::from(self.quantity)
    }
}

//! Compact order summary for list views.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Lightweight view of an order for list output: identity, customer, and
/// item progress counts, without the full item payloads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSummary {
    /// Unique identifier for the order
    pub id: u64,

    /// Customer reference, if recorded
    pub customer: Option<String>,

    /// Total number of line items
    pub total_items: u32,

    /// Items whose raw status is a terminal sentinel
    pub completed_items: u32,

    /// Order total in minor currency units
    pub total_amount: i64,

    /// Timestamp when the order was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the order was last modified (UTC)
    pub updated_at: Timestamp,
}

impl OrderSummary {
    /// True when every item has reached a terminal status.
    pub fn is_complete(&self) -> bool {
        self.total_items > 0 && self.completed_items == self.total_items
    }
}

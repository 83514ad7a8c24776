//! Stage entry model for the history ledger.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// One row of an item's append-only stage history.
///
/// The stage name is denormalized at write time so the ledger stays
/// readable even if the stage is later renamed or removed from its
/// workflow. Closed entries (with `left_at` set) are never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StageEntry {
    /// Stage id at the time of entry
    pub stage_id: String,

    /// Stage name at the time of entry
    pub stage_name: String,

    /// When the item entered the stage (UTC)
    pub entered_at: Timestamp,

    /// When the item left the stage; absent while the entry is open
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_at: Option<Timestamp>,

    /// Milliseconds spent in the stage, computed once at close time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<i64>,

    /// Operator who performed the transition into this stage
    pub performed_by: String,

    /// Operator-supplied reason (backward moves and restarts)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl StageEntry {
    /// True while the entry has not been closed with an exit timestamp.
    pub fn is_open(&self) -> bool {
        self.left_at.is_none()
    }
}

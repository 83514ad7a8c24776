//! Terminal status sentinels and their legacy spellings.

use serde::{Deserialize, Serialize};

/// Raw status value for an item that has finished all configured workflows.
pub const DONE_STATUS: &str = "done";

/// Raw status value for the cancel drop (restart trigger, see the engine).
pub const CANCEL_STATUS: &str = "cancel";

/// A status value that lives outside any workflow's stage list.
///
/// Terminal sentinels are never renormalized: once an item's raw status is
/// recognized as terminal, the stage resolver returns it unchanged.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TerminalStatus {
    /// All configured workflows finished
    Done,

    /// Dropped on the cancel column (functions as a restart trigger)
    Cancelled,
}

impl TerminalStatus {
    /// Recognize a raw status value as a terminal sentinel.
    ///
    /// Legacy records wrote localized keywords (`hoan_thanh`, `da_giao`,
    /// `huy`) instead of the canonical sentinels; they map to the same
    /// variants and are preserved on read.
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            DONE_STATUS | "hoan_thanh" | "da_giao" => Some(TerminalStatus::Done),
            CANCEL_STATUS | "huy" => Some(TerminalStatus::Cancelled),
            _ => None,
        }
    }

    /// Convert to the canonical raw status string.
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminalStatus::Done => DONE_STATUS,
            TerminalStatus::Cancelled => CANCEL_STATUS,
        }
    }

    /// Get status with consistent icon formatting for display.
    pub fn with_icon(&self) -> &'static str {
        match self {
            TerminalStatus::Done => "✓ Done",
            TerminalStatus::Cancelled => "↺ Cancelled",
        }
    }
}

//! Session-scoped activity log.
//!
//! An in-memory list of human-readable transition events for display. It is
//! an explicit injectable object owned by the tracker, constructed at
//! application start, never persisted, rebuilt each session.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Severity of an activity event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    /// Routine transition
    Info,

    /// Noteworthy event (workflow restarts via the cancel drop)
    Warning,
}

impl ActivityLevel {
    /// Convert to display string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Info => "info",
            ActivityLevel::Warning => "warning",
        }
    }
}

/// One human-readable event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityEvent {
    /// Severity
    pub level: ActivityLevel,

    /// Operator that triggered the event
    pub actor: String,

    /// Human-readable message
    pub message: String,

    /// When the event was recorded (UTC)
    pub at: Timestamp,
}

/// In-memory, session-scoped event list. Oldest events are dropped once
/// the capacity is reached.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    events: Vec<ActivityEvent>,
    capacity: usize,
}

/// Default number of retained events.
pub const DEFAULT_CAPACITY: usize = 500;

impl ActivityLog {
    /// Create an empty log retaining up to `capacity` events.
    pub fn new(capacity: usize) -> Self {
        Self {
            events: Vec::new(),
            capacity,
        }
    }

    /// Record an event, evicting the oldest entry when full.
    pub fn record(
        &mut self,
        level: ActivityLevel,
        actor: impl Into<String>,
        message: impl Into<String>,
        now: Timestamp,
    ) {
        if self.capacity == 0 {
            return;
        }
        if self.events.len() == self.capacity {
            self.events.remove(0);
        }
        self.events.push(ActivityEvent {
            level,
            actor: actor.into(),
            message: message.into(),
            at: now,
        });
    }

    /// Snapshot of the recorded events, oldest first.
    pub fn events(&self) -> &[ActivityEvent] {
        &self.events
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when nothing has been recorded this session.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(second: i64) -> Timestamp {
        Timestamp::from_second(second).unwrap()
    }

    #[test]
    fn test_record_and_snapshot() {
        let mut log = ActivityLog::default();
        log.record(ActivityLevel::Info, "an", "item moved", ts(1));
        log.record(ActivityLevel::Warning, "an", "workflow restarted", ts(2));

        assert_eq!(log.len(), 2);
        assert_eq!(log.events()[0].message, "item moved");
        assert_eq!(log.events()[1].level, ActivityLevel::Warning);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut log = ActivityLog::new(2);
        log.record(ActivityLevel::Info, "an", "first", ts(1));
        log.record(ActivityLevel::Info, "an", "second", ts(2));
        log.record(ActivityLevel::Info, "an", "third", ts(3));

        assert_eq!(log.len(), 2);
        assert_eq!(log.events()[0].message, "second");
        assert_eq!(log.events()[1].message, "third");
    }

    #[test]
    fn test_empty_log() {
        let log = ActivityLog::default();
        assert!(log.is_empty());
        assert!(log.events().is_empty());
    }
}

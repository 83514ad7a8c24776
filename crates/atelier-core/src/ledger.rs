//! Append-only history ledger for stage transitions.
//!
//! Every transition closes the currently open [`StageEntry`] (setting
//! `left_at` and the computed duration) and, for non-terminal moves, opens a
//! new one. Both sides of the write use a single captured timestamp so no
//! drift is introduced between closing one stage and entering the next.
//! Closed entries are never mutated afterwards.

use jiff::Timestamp;

use crate::models::StageEntry;

/// Close the open entry, if any, at `now`.
///
/// The duration is computed exactly once, at close time, as
/// `left_at - entered_at` in milliseconds; it is never recomputed later.
pub fn close_open_entry(history: &mut [StageEntry], now: Timestamp) {
    if let Some(last) = history.last_mut() {
        if last.is_open() {
            last.left_at = Some(now);
            last.duration_ms = Some(now.as_millisecond() - last.entered_at.as_millisecond());
        }
    }
}

/// Close the open entry and append a new open entry for the given stage.
///
/// The `reason` is recorded on the new entry for backward moves and
/// workflow restarts.
pub fn append_transition(
    history: &mut Vec<StageEntry>,
    stage_id: &str,
    stage_name: &str,
    actor: &str,
    reason: Option<&str>,
    now: Timestamp,
) {
    close_open_entry(history, now);
    history.push(StageEntry {
        stage_id: stage_id.to_string(),
        stage_name: stage_name.to_string(),
        entered_at: now,
        left_at: None,
        duration_ms: None,
        performed_by: actor.to_string(),
        reason: reason.map(String::from),
    });
}

/// The currently open entry, if any.
pub fn open_entry(history: &[StageEntry]) -> Option<&StageEntry> {
    history.last().filter(|entry| entry.is_open())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(second: i64) -> Timestamp {
        Timestamp::from_second(second).unwrap()
    }

    #[test]
    fn test_append_to_empty_history_opens_entry() {
        let mut history = Vec::new();
        append_transition(&mut history, "s1", "Queue", "an", None, ts(1000));

        assert_eq!(history.len(), 1);
        let entry = &history[0];
        assert_eq!(entry.stage_id, "s1");
        assert_eq!(entry.stage_name, "Queue");
        assert_eq!(entry.performed_by, "an");
        assert!(entry.is_open());
        assert!(entry.reason.is_none());
    }

    #[test]
    fn test_append_closes_previous_entry_with_exact_duration() {
        let mut history = Vec::new();
        append_transition(&mut history, "s1", "Queue", "an", None, ts(1000));
        append_transition(&mut history, "s2", "Cleaning", "binh", None, ts(1090));

        assert_eq!(history.len(), 2);
        let closed = &history[0];
        assert_eq!(closed.left_at, Some(ts(1090)));
        assert_eq!(closed.duration_ms, Some(90_000));
        // Close and open share the same captured timestamp
        assert_eq!(history[1].entered_at, closed.left_at.unwrap());
        assert!(history[1].is_open());
    }

    #[test]
    fn test_exactly_one_open_entry_after_transitions() {
        let mut history = Vec::new();
        append_transition(&mut history, "s1", "Queue", "an", None, ts(1));
        append_transition(&mut history, "s2", "Cleaning", "an", None, ts(2));
        append_transition(&mut history, "s1", "Queue", "an", Some("QC failed"), ts(3));

        let open: Vec<&StageEntry> = history.iter().filter(|e| e.is_open()).collect();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].stage_id, "s1");
        assert_eq!(open[0].reason.as_deref(), Some("QC failed"));
        assert_eq!(open_entry(&history).unwrap().stage_id, "s1");
    }

    #[test]
    fn test_close_without_reopen_for_terminal_drop() {
        let mut history = Vec::new();
        append_transition(&mut history, "s1", "Queue", "an", None, ts(10));
        close_open_entry(&mut history, ts(25));

        assert_eq!(history.len(), 1);
        assert!(!history[0].is_open());
        assert_eq!(history[0].duration_ms, Some(15_000));
        assert!(open_entry(&history).is_none());
    }

    #[test]
    fn test_close_is_idempotent_on_closed_history() {
        let mut history = Vec::new();
        append_transition(&mut history, "s1", "Queue", "an", None, ts(10));
        close_open_entry(&mut history, ts(20));
        let snapshot = history.clone();

        // A later close must not touch the already-closed entry
        close_open_entry(&mut history, ts(99));
        assert_eq!(history, snapshot);
    }

    #[test]
    fn test_close_on_empty_history_is_noop() {
        let mut history: Vec<StageEntry> = Vec::new();
        close_open_entry(&mut history, ts(5));
        assert!(history.is_empty());
    }
}

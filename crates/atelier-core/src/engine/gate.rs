//! Sequential service gate.
//!
//! Services within one order are processed in catalog-declared sequence: an
//! item belonging to service N cannot move while any item of an
//! earlier-sequenced service is still in flight. The gate models a
//! real-world constraint: a later repair step cannot begin before an
//! earlier one finishes.

use crate::error::{Result, TrackerError};

/// Projection of one sibling order item, precomputed by the caller so the
/// gate itself stays pure: identity, service link, and whether its status
/// already counts as finished (terminal sentinel or a stage named "Done").
#[derive(Debug, Clone, PartialEq)]
pub struct SiblingStatus {
    /// Item id
    pub item_id: u64,

    /// Service link; items without one are exempt from gating
    pub service_id: Option<u64>,

    /// Service display name, used in rejection messages
    pub service_name: String,

    /// The item's status counts as finished
    pub terminal: bool,
}

/// Canonical service sequence for an order: service ids in order of first
/// appearance across the sibling items.
pub fn service_sequence(siblings: &[SiblingStatus]) -> Vec<u64> {
    let mut sequence = Vec::new();
    for sibling in siblings {
        if let Some(service_id) = sibling.service_id {
            if !sequence.contains(&service_id) {
                sequence.push(service_id);
            }
        }
    }
    sequence
}

/// Reject with [`TrackerError::SequenceBlocked`] when any item of a service
/// sequenced before `service_id` is not yet finished.
///
/// Items without a service link are treated as singletons and never
/// blocked. The check runs before any mutation; a rejection leaves all
/// state untouched.
pub fn check_sequence_gate(service_id: Option<u64>, siblings: &[SiblingStatus]) -> Result<()> {
    let Some(service_id) = service_id else {
        return Ok(());
    };

    let sequence = service_sequence(siblings);
    let Some(position) = sequence.iter().position(|id| *id == service_id) else {
        return Ok(());
    };

    for predecessor in &sequence[..position] {
        if let Some(blocking) = siblings
            .iter()
            .find(|s| s.service_id == Some(*predecessor) && !s.terminal)
        {
            return Err(TrackerError::SequenceBlocked {
                service: blocking.service_name.clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sibling(item_id: u64, service_id: Option<u64>, name: &str, terminal: bool) -> SiblingStatus {
        SiblingStatus {
            item_id,
            service_id,
            service_name: name.to_string(),
            terminal,
        }
    }

    #[test]
    fn test_service_sequence_first_appearance_order() {
        let siblings = vec![
            sibling(1, Some(20), "Polish", false),
            sibling(2, Some(10), "Clean", false),
            sibling(3, Some(20), "Polish", false),
            sibling(4, None, "Loose", false),
        ];

        assert_eq!(service_sequence(&siblings), vec![20, 10]);
    }

    #[test]
    fn test_first_service_never_blocked() {
        let siblings = vec![
            sibling(1, Some(10), "Clean", false),
            sibling(2, Some(20), "Polish", false),
        ];

        assert!(check_sequence_gate(Some(10), &siblings).is_ok());
    }

    #[test]
    fn test_later_service_blocked_by_incomplete_predecessor() {
        let siblings = vec![
            sibling(1, Some(10), "Clean", false),
            sibling(2, Some(20), "Polish", false),
        ];

        let err = check_sequence_gate(Some(20), &siblings).unwrap_err();
        match err {
            TrackerError::SequenceBlocked { service } => assert_eq!(service, "Clean"),
            other => panic!("expected SequenceBlocked, got {other:?}"),
        }
    }

    #[test]
    fn test_later_service_unblocked_once_predecessor_finishes() {
        let siblings = vec![
            sibling(1, Some(10), "Clean", true),
            sibling(2, Some(20), "Polish", false),
        ];

        assert!(check_sequence_gate(Some(20), &siblings).is_ok());
    }

    #[test]
    fn test_all_items_of_predecessor_must_finish() {
        let siblings = vec![
            sibling(1, Some(10), "Clean", true),
            sibling(2, Some(10), "Clean", false),
            sibling(3, Some(20), "Polish", false),
        ];

        assert!(check_sequence_gate(Some(20), &siblings).is_err());
    }

    #[test]
    fn test_items_without_service_are_exempt() {
        let siblings = vec![
            sibling(1, Some(10), "Clean", false),
            sibling(2, None, "Loose", false),
        ];

        // The unlinked item is never blocked...
        assert!(check_sequence_gate(None, &siblings).is_ok());
        // ...and never blocks others
        assert!(check_sequence_gate(Some(10), &siblings).is_ok());
    }

    #[test]
    fn test_unknown_service_is_exempt() {
        let siblings = vec![sibling(1, Some(10), "Clean", false)];
        assert!(check_sequence_gate(Some(99), &siblings).is_ok());
    }
}

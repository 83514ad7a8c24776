//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::engine::TransitionKind;
use crate::models::{Order, ServiceCatalogItem, WorkflowDefinition};
use crate::tracker::TransitionOutcome;

/// Wrapper type for displaying the result of create operations.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Order> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created order with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<WorkflowDefinition> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Registered workflow '{}'", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<ServiceCatalogItem> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created service with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying an applied stage transition.
pub struct TransitionResult(pub TransitionOutcome);

impl fmt::Display for TransitionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headline = match self.0.kind {
            TransitionKind::NoOp => "Nothing to do",
            TransitionKind::Forward => "Moved forward",
            TransitionKind::Backward => "Moved back",
            TransitionKind::Chain => "Handed off to next workflow",
            TransitionKind::Complete => "Completed",
            TransitionKind::Restart => "Workflow restarted",
        };
        writeln!(f, "{headline}: {}", self.0.note)?;
        writeln!(f)?;
        write!(f, "{}", self.0.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemKind, OrderItem};

    #[test]
    fn test_transition_result_display() {
        let outcome = TransitionOutcome {
            order_id: 1,
            item: OrderItem {
                id: 2,
                name: "Deep Clean".to_string(),
                kind: ItemKind::Service,
                price: 150_000,
                quantity: 1,
                status: "done".to_string(),
                service_id: None,
                workflow_id: None,
                history: vec![],
                stage_assignments: Default::default(),
                assigned_members: vec![],
                commissions: Default::default(),
                technical_log: vec![],
            },
            kind: TransitionKind::Complete,
            note: "Deep Clean completed".to_string(),
        };

        let output = format!("{}", TransitionResult(outcome));
        assert!(output.contains("Completed: Deep Clean completed"));
        assert!(output.contains("✓ Done"));
    }
}

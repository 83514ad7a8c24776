//! Collection wrapper types for displaying groups of domain objects.
//!
//! Newtype wrappers that format collections with consistent structure and
//! graceful empty handling.

use std::fmt;

use crate::activity::ActivityEvent;
use crate::display::datetime::LocalDateTime;
use crate::models::{OrderSummary, ServiceCatalogItem, StageEntry, WorkflowDefinition};
use crate::tracker::BoardColumn;

/// Newtype wrapper for displaying collections of order summaries.
pub struct OrderSummaries(pub Vec<OrderSummary>);

impl OrderSummaries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of summaries in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for OrderSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No orders found.")
        } else {
            for summary in &self.0 {
                write!(f, "{}", summary)?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying an item's stage history ledger.
pub struct HistoryEntries(pub Vec<StageEntry>);

impl fmt::Display for HistoryEntries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No stage history recorded.")
        } else {
            for entry in &self.0 {
                write!(f, "{}", entry)?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying the workflow registry.
pub struct Workflows(pub Vec<WorkflowDefinition>);

impl fmt::Display for Workflows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No workflows configured.")
        } else {
            for workflow in &self.0 {
                write!(f, "{}", workflow)?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying the service catalog.
pub struct Services(pub Vec<ServiceCatalogItem>);

impl fmt::Display for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No services in the catalog.")
        } else {
            for service in &self.0 {
                write!(f, "{}", service)?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying the kanban board.
pub struct Board(pub Vec<BoardColumn>);

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "Nothing on the board.")
        } else {
            for column in &self.0 {
                writeln!(f, "## {} ({})", column.name, column.cards.len())?;
                writeln!(f)?;
                for card in &column.cards {
                    match &card.customer {
                        Some(customer) => writeln!(
                            f,
                            "- {} (order {}, item {}) — {customer}",
                            card.name, card.order_id, card.item_id
                        )?,
                        None => writeln!(
                            f,
                            "- {} (order {}, item {})",
                            card.name, card.order_id, card.item_id
                        )?,
                    }
                }
                writeln!(f)?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying the session activity log.
pub struct ActivityEvents(pub Vec<ActivityEvent>);

impl fmt::Display for ActivityEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No activity this session.")
        } else {
            for event in &self.0 {
                writeln!(
                    f,
                    "- [{}] {} {} — {}",
                    event.level.as_str(),
                    LocalDateTime(&event.at),
                    event.message,
                    event.actor
                )?;
            }
            Ok(())
        }
    }
}

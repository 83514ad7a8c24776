//! Display implementations for domain models.
//!
//! All output is markdown for rich terminal rendering, separated from the
//! model definitions to keep data and presentation apart.

use std::fmt;

use super::datetime::{HumanDuration, LocalDateTime};
use crate::models::{
    ItemKind, Order, OrderItem, OrderSummary, ServiceCatalogItem, StageEntry, TerminalStatus,
    WorkflowDefinition,
};
use crate::resolver::stage::ItemProgress;
use crate::staffing::task_summary;

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TerminalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Order {}", self.id)?;
        writeln!(f)?;

        // Metadata section
        if let Some(customer) = &self.customer {
            writeln!(f, "- Customer: {customer}")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;
        let total: i64 = self.items.iter().map(OrderItem::line_total).sum();
        writeln!(f, "- Total: {total}")?;

        if let Some(note) = &self.note {
            writeln!(f)?;
            writeln!(f, "{note}")?;
        }

        if !self.items.is_empty() {
            writeln!(f, "\n## Items")?;
            writeln!(f)?;
            for item in &self.items {
                write!(f, "{}", item)?;
            }
        } else {
            writeln!(f, "\nNo items in this order.")?;
        }

        Ok(())
    }
}

impl OrderItem {
    /// Label for the item's current position: terminal icon, the open
    /// ledger entry's stage name, or the raw status as a last resort.
    fn status_label(&self) -> String {
        if let Some(terminal) = TerminalStatus::from_raw(&self.status) {
            return terminal.with_icon().to_string();
        }
        self.history
            .last()
            .filter(|entry| entry.is_open())
            .map(|entry| entry.stage_name.clone())
            .unwrap_or_else(|| self.status.clone())
    }
}

impl fmt::Display for OrderItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. {} ({})",
            self.id,
            self.name,
            self.status_label()
        )?;
        writeln!(f)?;

        writeln!(f, "- Kind: {}", self.kind)?;
        writeln!(f, "- Price: {} x {}", self.price, self.quantity)?;
        if let Some(workflow_id) = &self.workflow_id {
            writeln!(f, "- Workflow: {workflow_id}")?;
        }
        if !self.assigned_members.is_empty() {
            writeln!(f, "- Assigned: {}", self.assigned_members.join(", "))?;
        }
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for OrderSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = if self.total_items > 0 {
            format!(" ({}/{})", self.completed_items, self.total_items)
        } else {
            String::new()
        };

        let customer = self.customer.as_deref().unwrap_or("walk-in");
        writeln!(f, "## Order {} — {customer}{progress}", self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Total**: {}", self.total_amount)?;
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for StageEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- **{}** entered {}",
            self.stage_name,
            LocalDateTime(&self.entered_at)
        )?;
        if let Some(duration) = self.duration_ms {
            write!(f, ", spent {}", HumanDuration(duration))?;
        } else {
            write!(f, " (current)")?;
        }
        write!(f, " — {}", self.performed_by)?;
        if let Some(reason) = &self.reason {
            write!(f, " ({reason})")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for WorkflowDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} ({})", self.label, self.id)?;
        writeln!(f)?;
        if let Some(department) = &self.department {
            writeln!(f, "- Department: {department}")?;
        }

        if self.stages.is_empty() {
            writeln!(f, "\nNo stages configured.")?;
            return Ok(());
        }

        for stage in self.stages_in_order() {
            let tasks = task_summary(stage);
            if tasks.total > 0 {
                writeln!(
                    f,
                    "{}. {} [{}/{} tasks]",
                    stage.order, stage.name, tasks.completed, tasks.total
                )?;
            } else {
                writeln!(f, "{}. {}", stage.order, stage.name)?;
            }
            for task in stage.tasks_in_order() {
                let mark = if task.completed { "x" } else { " " };
                writeln!(f, "   - [{mark}] {}", task.title)?;
            }
        }
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for ServiceCatalogItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Price**: {}", self.price)?;
        if !self.workflows.is_empty() {
            let chain: Vec<&str> = self
                .workflows
                .iter()
                .map(|r| r.workflow_id.as_str())
                .collect();
            writeln!(f, "- **Workflows**: {}", chain.join(" → "))?;
        }
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for ItemProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.workflow {
            Some(workflow) => {
                let def = workflow.definition();
                write!(f, "Workflow: {}", def.label)?;
                if workflow.is_synthesized() {
                    write!(f, " (embedded)")?;
                }
                writeln!(f)?;
            }
            None => writeln!(f, "No workflow configured.")?,
        }

        if let Some(terminal) = self.terminal {
            writeln!(f, "Status: {}", terminal.with_icon())?;
        }

        for flag in &self.stages {
            let mark = if flag.current {
                "➤"
            } else if flag.completed {
                "✓"
            } else {
                "○"
            };
            writeln!(f, "{mark} {}", flag.stage_name)?;
        }

        Ok(())
    }
}

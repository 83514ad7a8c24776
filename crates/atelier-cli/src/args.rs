use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{
    AssignTaskArgs, ItemRefArgs, MoveItemArgs, OrderCommands, ServiceCommands, SetTaskDoneArgs,
    WorkflowCommands,
};

/// Main command-line interface for the Atelier job tracker
///
/// Atelier tracks repair-and-spa orders whose service items progress
/// through configurable multi-stage workflows. The CLI covers order entry,
/// stage moves (the drag-and-drop surface of the board, as a command), a
/// kanban board, per-item progress and history, and workflow/service
/// catalog management.
#[derive(Parser)]
#[command(version, about, name = "atelier")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/atelier/atelier.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Atelier CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage orders
    #[command(alias = "o")]
    Order {
        #[command(subcommand)]
        command: OrderCommands,
    },
    /// Manage workflow definitions
    #[command(alias = "w")]
    Workflow {
        #[command(subcommand)]
        command: WorkflowCommands,
    },
    /// Manage the service catalog
    #[command(alias = "svc")]
    Service {
        #[command(subcommand)]
        command: ServiceCommands,
    },
    /// Move an order item to another stage (or drop it on done/cancel)
    #[command(alias = "mv")]
    Move(MoveItemArgs),
    /// Show the kanban board of in-flight service items
    #[command(alias = "b")]
    Board,
    /// Show the progress stepper for one item
    Progress(ItemRefArgs),
    /// Show the stage history ledger for one item
    History(ItemRefArgs),
    /// Assign staff to one task of an item
    Assign(AssignTaskArgs),
    /// Check a workflow stage task on or off
    Task(SetTaskDoneArgs),
    /// Show this session's activity log
    Activity,
}

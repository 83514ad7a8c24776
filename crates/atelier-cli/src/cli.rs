//! Command-line interface definitions and handlers using clap
//!
//! This module implements the parameter wrapper pattern: each command gets
//! a clap `Args` struct here that converts into the framework-free
//! parameter structs of `atelier_core::params` via `From`. CLI concerns
//! (flag names, delimiters, help text) stay on this side of the boundary;
//! the core types never see a clap derive.

use anyhow::{anyhow, Context, Result};
use atelier_core::{
    display::{
        ActivityEvents, Board, CreateResult, HistoryEntries, OrderSummaries, Services,
        TransitionResult, Workflows,
    },
    models::{Stage, WorkflowRef},
    params::*,
    Tracker,
};
use clap::{Args, Subcommand};

use crate::renderer::TerminalRenderer;

/// Create a new order
#[derive(Args)]
pub struct CreateOrderArgs {
    /// Customer name or phone
    #[arg(short, long, help = "Customer reference recorded on the order")]
    pub customer: Option<String>,
    /// Free-text note for the order
    #[arg(short, long)]
    pub note: Option<String>,
    /// Service catalog IDs, in processing sequence - comma-separated list
    #[arg(
        short,
        long,
        value_delimiter = ',',
        help = "Service catalog IDs in processing sequence"
    )]
    pub services: Vec<u64>,
    /// Retail product lines as name:price[:quantity]
    #[arg(
        short,
        long,
        help = "Retail product line as name:price[:quantity]; repeatable"
    )]
    pub product: Vec<String>,
    /// Operator recorded on the opening history entries
    #[arg(long, default_value = "operator")]
    pub actor: String,
}

impl CreateOrderArgs {
    /// Convert CLI arguments to core parameters, parsing product lines.
    pub fn into_params(self) -> Result<CreateOrder> {
        let products = self
            .product
            .iter()
            .map(|raw| parse_product(raw))
            .collect::<Result<Vec<_>>>()?;

        Ok(CreateOrder {
            customer: self.customer,
            note: self.note,
            services: self.services,
            products,
            actor: Some(self.actor),
        })
    }
}

/// Parse a `name:price[:quantity]` product line.
fn parse_product(raw: &str) -> Result<ProductDraft> {
    let mut parts = raw.split(':');
    let name = parts
        .next()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| anyhow!("Product line '{raw}' needs a name"))?;
    let price = parts
        .next()
        .ok_or_else(|| anyhow!("Product line '{raw}' needs a price"))?
        .parse::<i64>()
        .with_context(|| format!("Invalid price in product line '{raw}'"))?;
    let quantity = match parts.next() {
        Some(qty) => qty
            .parse::<u32>()
            .with_context(|| format!("Invalid quantity in product line '{raw}'"))?,
        None => 1,
    };

    Ok(ProductDraft {
        name: name.to_string(),
        price,
        quantity,
    })
}

/// Show details of a specific order
#[derive(Args)]
pub struct ShowOrderArgs {
    /// ID of the order to display
    #[arg(help = "Unique identifier of the order to show details for")]
    pub id: u64,
}

impl From<ShowOrderArgs> for Id {
    fn from(val: ShowOrderArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum OrderCommands {
    /// Create a new order
    #[command(alias = "c")]
    Create(CreateOrderArgs),
    /// List all orders
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show details of a specific order
    #[command(alias = "s")]
    Show(ShowOrderArgs),
}

/// Register a workflow definition
#[derive(Args)]
pub struct AddWorkflowArgs {
    /// Workflow id (opaque, referenced by services)
    pub id: String,
    /// Display label
    pub label: String,
    /// Owning department
    #[arg(short, long)]
    pub department: Option<String>,
    /// Stages as a JSON array of {id, name, order, tasks?, assigned_members?, color?}
    #[arg(
        long,
        help = "Stage list as JSON, e.g. '[{\"id\":\"s1\",\"name\":\"Queue\",\"order\":1}]'"
    )]
    pub stages: Option<String>,
}

impl AddWorkflowArgs {
    /// Convert CLI arguments to core parameters, parsing the stage JSON.
    pub fn into_params(self) -> Result<CreateWorkflow> {
        let stages: Vec<Stage> = match self.stages.as_deref() {
            Some(raw) => serde_json::from_str(raw).context("Invalid stage JSON")?,
            None => vec![],
        };

        Ok(CreateWorkflow {
            id: self.id,
            label: self.label,
            department: self.department,
            stages,
        })
    }
}

#[derive(Subcommand)]
pub enum WorkflowCommands {
    /// Register (or replace) a workflow definition
    #[command(alias = "a")]
    Add(AddWorkflowArgs),
    /// List all workflow definitions
    #[command(aliases = ["l", "ls"])]
    List,
}

/// Create a service catalog entry
#[derive(Args)]
pub struct AddServiceArgs {
    /// Service name
    pub name: String,
    /// Price in minor currency units
    pub price: i64,
    /// Workflow ids in chaining sequence - comma-separated list
    #[arg(
        short,
        long,
        value_delimiter = ',',
        help = "Workflow ids in chaining sequence"
    )]
    pub workflows: Vec<String>,
}

impl From<AddServiceArgs> for CreateService {
    fn from(val: AddServiceArgs) -> Self {
        CreateService {
            name: val.name,
            price: val.price,
            workflows: val
                .workflows
                .into_iter()
                .enumerate()
                .map(|(idx, workflow_id)| WorkflowRef {
                    workflow_id,
                    order: idx as u32 + 1,
                    name: None,
                })
                .collect(),
        }
    }
}

#[derive(Subcommand)]
pub enum ServiceCommands {
    /// Create a service catalog entry
    #[command(alias = "a")]
    Add(AddServiceArgs),
    /// List the service catalog
    #[command(aliases = ["l", "ls"])]
    List,
}

/// Move an order item to another stage
///
/// The target is a stage id of the item's active workflow, or one of the
/// terminal drops: `done` (complete, or hand off into the service's next
/// workflow) and `cancel` (restart the current workflow; requires
/// --confirm).
#[derive(Args)]
pub struct MoveItemArgs {
    #[arg(help = "Order holding the item")]
    pub order_id: u64,
    #[arg(help = "Item to move")]
    pub item_id: u64,
    #[arg(help = "Target stage id, or 'done' / 'cancel'")]
    pub target: String,
    /// Operator performing the move
    #[arg(long, default_value = "operator")]
    pub actor: String,
    /// Reason for the move - required when moving back to an earlier stage
    #[arg(short, long)]
    pub reason: Option<String>,
    /// Confirm a cancel drop (restarts the current workflow)
    #[arg(long)]
    pub confirm: bool,
}

impl From<MoveItemArgs> for MoveItem {
    fn from(val: MoveItemArgs) -> Self {
        MoveItem {
            order_id: val.order_id,
            item_id: val.item_id,
            target_status: val.target,
            actor: val.actor,
            reason: val.reason,
            confirmed: val.confirm,
        }
    }
}

/// Address one item within one order
#[derive(Args)]
pub struct ItemRefArgs {
    #[arg(help = "Order holding the item")]
    pub order_id: u64,
    #[arg(help = "Item to inspect")]
    pub item_id: u64,
}

impl From<ItemRefArgs> for ItemRef {
    fn from(val: ItemRefArgs) -> Self {
        ItemRef {
            order_id: val.order_id,
            item_id: val.item_id,
        }
    }
}

/// Assign staff to one task of an item
#[derive(Args)]
pub struct AssignTaskArgs {
    #[arg(help = "Item carrying the task assignment")]
    pub item_id: u64,
    #[arg(help = "Task within the item's stage checklist")]
    pub task_id: String,
    /// Member ids - comma-separated list
    #[arg(short, long, value_delimiter = ',')]
    pub members: Vec<String>,
}

impl From<AssignTaskArgs> for AssignTask {
    fn from(val: AssignTaskArgs) -> Self {
        AssignTask {
            item_id: val.item_id,
            task_id: val.task_id,
            member_ids: val.members,
        }
    }
}

/// Check a workflow stage task on or off
#[derive(Args)]
pub struct SetTaskDoneArgs {
    #[arg(help = "Workflow holding the stage")]
    pub workflow_id: String,
    #[arg(help = "Stage holding the task")]
    pub stage_id: String,
    #[arg(help = "Task to toggle")]
    pub task_id: String,
    /// Mark the task as not done instead of done
    #[arg(long)]
    pub undone: bool,
}

impl From<SetTaskDoneArgs> for SetTaskDone {
    fn from(val: SetTaskDoneArgs) -> Self {
        SetTaskDone {
            workflow_id: val.workflow_id,
            stage_id: val.stage_id,
            task_id: val.task_id,
            completed: !val.undone,
        }
    }
}

/// Command handler wiring the tracker to the terminal renderer.
pub struct Cli {
    tracker: Tracker,
    renderer: TerminalRenderer,
}

impl Cli {
    /// Create a new CLI handler.
    pub fn new(tracker: Tracker, renderer: TerminalRenderer) -> Self {
        Self { tracker, renderer }
    }

    /// Handle order subcommands.
    pub async fn handle_order_command(self, command: OrderCommands) -> Result<()> {
        match command {
            OrderCommands::Create(args) => {
                let params = args.into_params()?;
                let order = self
                    .tracker
                    .create_order(&params)
                    .await
                    .context("Failed to create order")?;
                self.renderer.render(&CreateResult::new(order).to_string())
            }
            OrderCommands::List => self.list_orders().await,
            OrderCommands::Show(args) => {
                let params: Id = args.into();
                match self
                    .tracker
                    .get_order(&params)
                    .await
                    .context("Failed to load order")?
                {
                    Some(order) => self.renderer.render(&order.to_string()),
                    None => self
                        .renderer
                        .render(&format!("Order {} not found.\n", params.id)),
                }
            }
        }
    }

    /// List all orders as summaries (also the default command).
    pub async fn list_orders(&self) -> Result<()> {
        let summaries = self
            .tracker
            .list_order_summaries()
            .await
            .context("Failed to list orders")?;
        self.renderer.render(&OrderSummaries(summaries).to_string())
    }

    /// Handle workflow subcommands.
    pub async fn handle_workflow_command(self, command: WorkflowCommands) -> Result<()> {
        match command {
            WorkflowCommands::Add(args) => {
                let params = args.into_params()?;
                let workflow = self
                    .tracker
                    .add_workflow(&params)
                    .await
                    .context("Failed to register workflow")?;
                self.renderer
                    .render(&CreateResult::new(workflow).to_string())
            }
            WorkflowCommands::List => {
                let workflows = self
                    .tracker
                    .list_workflows()
                    .await
                    .context("Failed to list workflows")?;
                self.renderer.render(&Workflows(workflows).to_string())
            }
        }
    }

    /// Handle service catalog subcommands.
    pub async fn handle_service_command(self, command: ServiceCommands) -> Result<()> {
        match command {
            ServiceCommands::Add(args) => {
                let params: CreateService = args.into();
                let service = self
                    .tracker
                    .add_service(&params)
                    .await
                    .context("Failed to create service")?;
                self.renderer.render(&CreateResult::new(service).to_string())
            }
            ServiceCommands::List => {
                let services = self
                    .tracker
                    .list_services()
                    .await
                    .context("Failed to list services")?;
                self.renderer.render(&Services(services).to_string())
            }
        }
    }

    /// Handle a stage move.
    pub async fn handle_move(self, args: MoveItemArgs) -> Result<()> {
        let params: MoveItem = args.into();
        let outcome = self
            .tracker
            .move_item(&params)
            .await
            .context("Failed to move item")?;
        self.renderer.render(&TransitionResult(outcome).to_string())
    }

    /// Render the kanban board.
    pub async fn handle_board(self) -> Result<()> {
        let board = self
            .tracker
            .board()
            .await
            .context("Failed to build board")?;
        self.renderer.render(&Board(board).to_string())
    }

    /// Render the progress stepper for one item.
    pub async fn handle_progress(self, args: ItemRefArgs) -> Result<()> {
        let params: ItemRef = args.into();
        let progress = self
            .tracker
            .item_progress(&params)
            .await
            .context("Failed to resolve progress")?;
        self.renderer.render(&progress.to_string())
    }

    /// Render the stage history ledger for one item.
    pub async fn handle_history(self, args: ItemRefArgs) -> Result<()> {
        let params: ItemRef = args.into();
        let history = self
            .tracker
            .item_history(&params)
            .await
            .context("Failed to load history")?;
        self.renderer.render(&HistoryEntries(history).to_string())
    }

    /// Handle a task staff assignment.
    pub async fn handle_assign(self, args: AssignTaskArgs) -> Result<()> {
        let params: AssignTask = args.into();
        self.tracker
            .set_task_assignment(&params)
            .await
            .context("Failed to assign task")?;
        self.renderer.render(&format!(
            "Assigned {} member(s) to task '{}'.\n",
            params.member_ids.len(),
            params.task_id
        ))
    }

    /// Handle a task completion toggle.
    pub async fn handle_task(self, args: SetTaskDoneArgs) -> Result<()> {
        let params: SetTaskDone = args.into();
        self.tracker
            .set_task_done(&params)
            .await
            .context("Failed to update task")?;
        let state = if params.completed { "done" } else { "not done" };
        self.renderer
            .render(&format!("Marked task '{}' as {state}.\n", params.task_id))
    }

    /// Render the session activity log.
    pub async fn handle_activity(self) -> Result<()> {
        let events = self.tracker.activity().await;
        self.renderer.render(&ActivityEvents(events).to_string())
    }
}

//! Atelier CLI Application
//!
//! Command-line interface for the Atelier job tracking tool.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use atelier_core::TrackerBuilder;
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let tracker = TrackerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize tracker")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Atelier started");

    let cli = Cli::new(tracker, renderer);
    match command {
        Some(Order { command }) => cli.handle_order_command(command).await,
        Some(Workflow { command }) => cli.handle_workflow_command(command).await,
        Some(Service { command }) => cli.handle_service_command(command).await,
        Some(Move(args)) => cli.handle_move(args).await,
        Some(Board) => cli.handle_board().await,
        Some(Progress(args)) => cli.handle_progress(args).await,
        Some(History(args)) => cli.handle_history(args).await,
        Some(Assign(args)) => cli.handle_assign(args).await,
        Some(Task(args)) => cli.handle_task(args).await,
        Some(Activity) => cli.handle_activity().await,
        None => cli.handle_board().await,
    }
}

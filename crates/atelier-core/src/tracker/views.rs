//! Read-only view operations: board, progress, history, activity.

use super::Tracker;
use crate::{
    activity::ActivityEvent,
    error::{Result, TrackerError},
    models::{ItemKind, StageEntry, TerminalStatus},
    params::ItemRef,
    resolver::{
        registry::{resolve_item_workflow, ResolvedWorkflow},
        stage::{self, ItemProgress},
    },
};

/// One card on the kanban board.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardCard {
    /// Order the item belongs to
    pub order_id: u64,

    /// Item id
    pub item_id: u64,

    /// Item name
    pub name: String,

    /// Customer on the order, if recorded
    pub customer: Option<String>,
}

/// One column of the kanban board, keyed by stage display name.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardColumn {
    /// Column label (stage name, or a terminal column)
    pub name: String,

    /// Cards in the column, in scan order
    pub cards: Vec<BoardCard>,
}

impl Tracker {
    /// Kanban board over all orders: every service item grouped under its
    /// normalized current stage name. Items without a resolvable workflow
    /// land in the first default column; terminal items land in "Done" /
    /// "Cancelled" columns at the end.
    pub async fn board(&self) -> Result<Vec<BoardColumn>> {
        let registry = self.refreshed_registry().await?;
        let catalog = self.refreshed_catalog().await?;
        let orders = self.with_db(|db| db.list_orders()).await?;

        let mut columns: Vec<BoardColumn> = Vec::new();
        let mut push = |name: String, card: BoardCard| {
            if let Some(column) = columns.iter_mut().find(|c| c.name == name) {
                column.cards.push(card);
            } else {
                columns.push(BoardColumn {
                    name,
                    cards: vec![card],
                });
            }
        };

        for order in &orders {
            for item in &order.items {
                if item.kind != ItemKind::Service {
                    continue;
                }

                let service = item.service_id.and_then(|id| catalog.get(id));
                let workflow = resolve_item_workflow(&registry, service, item);
                let progress = stage::item_progress(item, workflow.as_ref());

                let column = match progress.terminal {
                    Some(TerminalStatus::Done) => "Done".to_string(),
                    Some(TerminalStatus::Cancelled) => "Cancelled".to_string(),
                    None => progress
                        .stage_name
                        .clone()
                        .unwrap_or_else(|| "Queue".to_string()),
                };

                push(
                    column,
                    BoardCard {
                        order_id: order.id,
                        item_id: item.id,
                        name: item.name.clone(),
                        customer: order.customer.clone(),
                    },
                );
            }
        }

        // Terminal columns read better at the far end of the board
        columns.sort_by_key(|c| match c.name.as_str() {
            "Done" => 1,
            "Cancelled" => 2,
            _ => 0,
        });

        Ok(columns)
    }

    /// Progress view for one item: active workflow, normalized stage, and
    /// the stage list with completion flags.
    pub async fn item_progress(&self, params: &ItemRef) -> Result<ItemProgress> {
        let registry = self.refreshed_registry().await?;
        let catalog = self.refreshed_catalog().await?;

        let order_id = params.order_id;
        let Some(order) = self.with_db(move |db| db.get_order(order_id)).await? else {
            return Err(TrackerError::OrderNotFound { id: params.order_id });
        };
        let Some(item) = order.item(params.item_id) else {
            return Err(TrackerError::ItemNotFound { id: params.item_id });
        };

        let service = item.service_id.and_then(|id| catalog.get(id));
        let workflow = resolve_item_workflow(&registry, service, item);
        Ok(stage::item_progress(item, workflow.as_ref()))
    }

    /// The stage history ledger for one item, oldest entry first.
    pub async fn item_history(&self, params: &ItemRef) -> Result<Vec<StageEntry>> {
        let order_id = params.order_id;
        let Some(order) = self.with_db(move |db| db.get_order(order_id)).await? else {
            return Err(TrackerError::OrderNotFound { id: params.order_id });
        };
        let Some(item) = order.item(params.item_id) else {
            return Err(TrackerError::ItemNotFound { id: params.item_id });
        };

        Ok(item.history.clone())
    }

    /// Snapshot of this session's activity events, oldest first.
    pub async fn activity(&self) -> Vec<ActivityEvent> {
        self.activity.lock().await.events().to_vec()
    }

    /// A resolved workflow for an item, exposed for interface layers that
    /// want to show provenance (registry vs. embedded fallback).
    pub async fn item_workflow(&self, params: &ItemRef) -> Result<Option<ResolvedWorkflow>> {
        let registry = self.refreshed_registry().await?;
        let catalog = self.refreshed_catalog().await?;

        let order_id = params.order_id;
        let Some(order) = self.with_db(move |db| db.get_order(order_id)).await? else {
            return Err(TrackerError::OrderNotFound { id: params.order_id });
        };
        let Some(item) = order.item(params.item_id) else {
            return Err(TrackerError::ItemNotFound { id: params.item_id });
        };

        let service = item.service_id.and_then(|id| catalog.get(id));
        Ok(resolve_item_workflow(&registry, service, item))
    }
}

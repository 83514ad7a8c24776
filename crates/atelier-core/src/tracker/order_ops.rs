//! Order entry and retrieval operations for the Tracker.

use jiff::Timestamp;

use super::Tracker;
use crate::{
    error::{Result, TrackerError},
    ledger,
    models::{ItemKind, Order, OrderItem, OrderSummary},
    params::{CreateOrder, Id},
    resolver::{
        catalog::{default_stage_columns, resolve_workflow_refs},
        registry::{resolve_workflow, ResolvedWorkflow},
    },
};

impl Tracker {
    /// Creates an order from catalog service references and free-form
    /// product lines.
    ///
    /// Service items start in the first stage of their resolved workflow
    /// with an open history entry; when no workflow is configured they fall
    /// into the first default board column. Products are born in the
    /// `done` sentinel with no workflow and empty history.
    pub async fn create_order(&self, params: &CreateOrder) -> Result<Order> {
        let registry = self.refreshed_registry().await?;
        let catalog = self.refreshed_catalog().await?;
        let actor = params.actor.clone().unwrap_or_else(|| "system".to_string());
        let now = Timestamp::now();

        let mut items = Vec::with_capacity(params.services.len() + params.products.len());

        for service_id in &params.services {
            let Some(service) = catalog.get(*service_id) else {
                return Err(TrackerError::ServiceNotFound { id: *service_id });
            };

            let refs = resolve_workflow_refs(service);
            let workflow = refs
                .first()
                .and_then(|r| resolve_workflow(&registry, Some(service), &r.workflow_id));

            let (workflow_id, first_stage) = match &workflow {
                Some(resolved) => {
                    let def = resolved.definition();
                    (Some(def.id.clone()), def.first_stage().cloned())
                }
                None => (None, None),
            };

            // No workflow configured: park the item in the first default
            // board column so it still shows up somewhere sensible.
            let (status, stage_name) = match &first_stage {
                Some(stage) => (stage.id.clone(), stage.name.clone()),
                None => {
                    let columns = default_stage_columns();
                    (columns[0].id.clone(), columns[0].name.clone())
                }
            };

            let mut history = Vec::new();
            ledger::append_transition(&mut history, &status, &stage_name, &actor, None, now);

            items.push(OrderItem {
                id: 0,
                name: service.name.clone(),
                kind: ItemKind::Service,
                price: service.price,
                quantity: 1,
                status,
                service_id: Some(service.id),
                workflow_id,
                history,
                stage_assignments: Default::default(),
                assigned_members: vec![],
                commissions: Default::default(),
                technical_log: vec![],
            });

            if let Some(ResolvedWorkflow::Synthesized(def)) = &workflow {
                log::warn!(
                    "workflow '{}' for service '{}' not in registry; using embedded stages",
                    def.id,
                    service.name
                );
            }
        }

        for product in &params.products {
            items.push(OrderItem {
                id: 0,
                name: product.name.clone(),
                kind: ItemKind::Product,
                price: product.price,
                quantity: product.quantity.max(1),
                status: OrderItem::initial_product_status(),
                service_id: None,
                workflow_id: None,
                history: vec![],
                stage_assignments: Default::default(),
                assigned_members: vec![],
                commissions: Default::default(),
                technical_log: vec![],
            });
        }

        if items.is_empty() {
            return Err(TrackerError::invalid_input(
                "items",
                "An order needs at least one service or product line",
            ));
        }

        let customer = params.customer.clone();
        let note = params.note.clone();
        let order = self
            .with_db(move |db| db.create_order(customer.as_deref(), note.as_deref(), &items))
            .await?;

        log::info!("created order {} with {} item(s)", order.id, order.items.len());
        Ok(order)
    }

    /// Retrieves an order by ID with items eagerly loaded.
    pub async fn get_order(&self, params: &Id) -> Result<Option<Order>> {
        let order_id = params.id;
        self.with_db(move |db| db.get_order(order_id)).await
    }

    /// Lists all orders, newest first.
    pub async fn list_orders(&self) -> Result<Vec<Order>> {
        self.with_db(|db| db.list_orders()).await
    }

    /// Lists compact order summaries, newest first.
    pub async fn list_order_summaries(&self) -> Result<Vec<OrderSummary>> {
        self.with_db(|db| db.list_order_summaries()).await
    }
}

//! Order CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::{ItemKind, Order, OrderItem, OrderSummary},
};

// Optimized SQL queries as const strings for compile-time optimization
const INSERT_ORDER_SQL: &str =
    "INSERT INTO orders (customer, note, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)";
const SELECT_ORDER_SQL: &str =
    "SELECT id, customer, note, created_at, updated_at FROM orders WHERE id = ?1";
const CHECK_ORDER_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM orders WHERE id = ?1)";
const UPDATE_ORDER_SQL: &str =
    "UPDATE orders SET customer = ?1, note = ?2, updated_at = ?3 WHERE id = ?4";
const INSERT_ITEM_SQL: &str = "INSERT INTO order_items (order_id, name, kind, price, quantity, status, service_id, workflow_id, history, stage_assignments, assigned_members, commissions, technical_log, item_order, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)";
const UPDATE_ITEM_SQL: &str = "UPDATE order_items SET name = ?1, kind = ?2, price = ?3, quantity = ?4, status = ?5, service_id = ?6, workflow_id = ?7, history = ?8, stage_assignments = ?9, assigned_members = ?10, commissions = ?11, technical_log = ?12, updated_at = ?13 WHERE id = ?14";
const SELECT_ITEMS_BY_ORDER_SQL: &str = "SELECT id, name, kind, price, quantity, status, service_id, workflow_id, history, stage_assignments, assigned_members, commissions, technical_log FROM order_items WHERE order_id = ?1 ORDER BY item_order";
const SELECT_ORDER_IDS_SQL: &str = "SELECT id FROM orders ORDER BY created_at DESC";
const SELECT_ORDER_SUMMARIES_SQL: &str = "SELECT id, customer, created_at, updated_at, total_items, completed_items, total_amount FROM order_summaries ORDER BY created_at DESC";

/// Parse a JSON text column into a typed value, mapping failures onto the
/// rusqlite conversion error so they surface with the column index.
fn parse_json_column<T: DeserializeOwned>(idx: usize, raw: &str) -> rusqlite::Result<T> {
    serde_json::from_str(raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Serialize a payload for a JSON text column. Absent optional fields are
/// skipped by the model serde attributes, so no null/undefined values ever
/// reach storage.
fn to_json_column<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

fn parse_timestamp(idx: usize, raw: &str) -> rusqlite::Result<Timestamp> {
    raw.parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

impl super::Database {
    /// Helper function to construct an OrderItem from a database row
    fn build_item_from_row(row: &rusqlite::Row) -> rusqlite::Result<OrderItem> {
        let kind_str: String = row.get(2)?;
        let kind = kind_str.parse::<ItemKind>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                Type::Text,
                format!("Invalid item kind: {kind_str}").into(),
            )
        })?;

        let history_raw: String = row.get(8)?;
        let stage_assignments_raw: String = row.get(9)?;
        let assigned_members_raw: String = row.get(10)?;
        let commissions_raw: String = row.get(11)?;
        let technical_log_raw: String = row.get(12)?;

        Ok(OrderItem {
            id: row.get::<_, i64>(0)? as u64,
            name: row.get(1)?,
            kind,
            price: row.get(3)?,
            quantity: row.get::<_, i64>(4)? as u32,
            status: row.get(5)?,
            service_id: row.get::<_, Option<i64>>(6)?.map(|id| id as u64),
            workflow_id: row.get(7)?,
            history: parse_json_column(8, &history_raw)?,
            stage_assignments: parse_json_column(9, &stage_assignments_raw)?,
            assigned_members: parse_json_column(10, &assigned_members_raw)?,
            commissions: parse_json_column(11, &commissions_raw)?,
            technical_log: parse_json_column(12, &technical_log_raw)?,
        })
    }

    /// Creates a new order with the given line items. Item ids on the input
    /// are placeholders; the returned order carries the assigned ids.
    pub fn create_order(
        &mut self,
        customer: Option<&str>,
        note: Option<&str>,
        items: &[OrderItem],
    ) -> Result<Order> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(INSERT_ORDER_SQL, params![customer, note, &now_str, &now_str])
            .map_err(|e| TrackerError::database_error("Failed to insert order", e))?;

        let order_id = tx.last_insert_rowid() as u64;

        let mut stored_items = Vec::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            tx.execute(
                INSERT_ITEM_SQL,
                params![
                    order_id as i64,
                    &item.name,
                    item.kind.as_str(),
                    item.price,
                    i64::from(item.quantity),
                    &item.status,
                    item.service_id.map(|id| id as i64),
                    item.workflow_id.as_deref(),
                    to_json_column(&item.history)?,
                    to_json_column(&item.stage_assignments)?,
                    to_json_column(&item.assigned_members)?,
                    to_json_column(&item.commissions)?,
                    to_json_column(&item.technical_log)?,
                    position as i64,
                    &now_str,
                    &now_str
                ],
            )
            .map_err(|e| TrackerError::database_error("Failed to insert order item", e))?;

            let mut stored = item.clone();
            stored.id = tx.last_insert_rowid() as u64;
            stored_items.push(stored);
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Order {
            id: order_id,
            customer: customer.map(String::from),
            note: note.map(String::from),
            items: stored_items,
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves an order by its ID with items eagerly loaded.
    pub fn get_order(&self, id: u64) -> Result<Option<Order>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_ORDER_SQL)
            .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;

        let mut order = stmt
            .query_row(params![id as i64], |row| {
                Ok(Order {
                    id: row.get::<_, i64>(0)? as u64,
                    customer: row.get(1)?,
                    note: row.get(2)?,
                    items: Vec::new(),
                    created_at: parse_timestamp(3, &row.get::<_, String>(3)?)?,
                    updated_at: parse_timestamp(4, &row.get::<_, String>(4)?)?,
                })
            })
            .optional()
            .map_err(|e| TrackerError::database_error("Failed to query order", e))?;

        if let Some(ref mut order) = order {
            order.items = self.get_items(order.id)?;
        }

        Ok(order)
    }

    /// Retrieves all items for an order, in entry order.
    pub fn get_items(&self, order_id: u64) -> Result<Vec<OrderItem>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_ITEMS_BY_ORDER_SQL)
            .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;

        let items = stmt
            .query_map(params![order_id as i64], Self::build_item_from_row)
            .map_err(|e| TrackerError::database_error("Failed to query order items", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| TrackerError::database_error("Failed to fetch order items", e))?;

        Ok(items)
    }

    /// Lists all orders with items eagerly loaded, newest first.
    pub fn list_orders(&self) -> Result<Vec<Order>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_ORDER_IDS_SQL)
            .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;

        let ids = stmt
            .query_map([], |row| row.get::<_, i64>(0))
            .map_err(|e| TrackerError::database_error("Failed to query orders", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| TrackerError::database_error("Failed to fetch orders", e))?;

        let mut orders = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(order) = self.get_order(id as u64)? {
                orders.push(order);
            }
        }

        Ok(orders)
    }

    /// Lists compact order summaries via the `order_summaries` view,
    /// newest first.
    pub fn list_order_summaries(&self) -> Result<Vec<OrderSummary>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_ORDER_SUMMARIES_SQL)
            .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;

        let summaries = stmt
            .query_map([], |row| {
                Ok(OrderSummary {
                    id: row.get::<_, i64>(0)? as u64,
                    customer: row.get(1)?,
                    total_items: row.get::<_, i64>(4)? as u32,
                    completed_items: row.get::<_, i64>(5)? as u32,
                    total_amount: row.get(6)?,
                    created_at: parse_timestamp(2, &row.get::<_, String>(2)?)?,
                    updated_at: parse_timestamp(3, &row.get::<_, String>(3)?)?,
                })
            })
            .map_err(|e| TrackerError::database_error("Failed to query order summaries", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| TrackerError::database_error("Failed to fetch order summaries", e))?;

        Ok(summaries)
    }

    /// Persists a whole order, the order row and every item row, as one
    /// transaction. There is no partial-item persistence: callers mutate
    /// the in-memory order and hand the complete record back (last write
    /// wins).
    pub fn update_order(&mut self, order: &Order) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(CHECK_ORDER_EXISTS_SQL, params![order.id as i64], |row| {
                row.get(0)
            })
            .map_err(|e| TrackerError::database_error("Failed to check order existence", e))?;

        if !exists {
            return Err(TrackerError::OrderNotFound { id: order.id });
        }

        let now_str = Timestamp::now().to_string();

        tx.execute(
            UPDATE_ORDER_SQL,
            params![
                order.customer.as_deref(),
                order.note.as_deref(),
                &now_str,
                order.id as i64
            ],
        )
        .map_err(|e| TrackerError::database_error("Failed to update order", e))?;

        for item in &order.items {
            let updated = tx
                .execute(
                    UPDATE_ITEM_SQL,
                    params![
                        &item.name,
                        item.kind.as_str(),
                        item.price,
                        i64::from(item.quantity),
                        &item.status,
                        item.service_id.map(|id| id as i64),
                        item.workflow_id.as_deref(),
                        to_json_column(&item.history)?,
                        to_json_column(&item.stage_assignments)?,
                        to_json_column(&item.assigned_members)?,
                        to_json_column(&item.commissions)?,
                        to_json_column(&item.technical_log)?,
                        &now_str,
                        item.id as i64
                    ],
                )
                .map_err(|e| TrackerError::database_error("Failed to update order item", e))?;

            if updated == 0 {
                return Err(TrackerError::ItemNotFound { id: item.id });
            }
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }
}

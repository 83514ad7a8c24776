//! Database operations and SQLite management for the job tracker.
//!
//! This module provides low-level database operations for orders, the
//! workflow registry, the service catalog, and per-item task assignments.
//! It handles SQLite connections, schema management, and the adapter
//! mapping between JSON text columns and the typed models of
//! [`crate::models`]; nothing above this layer inspects raw records.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod assignment_queries;
pub mod catalog_queries;
pub mod migrations;
pub mod order_queries;
pub mod workflow_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

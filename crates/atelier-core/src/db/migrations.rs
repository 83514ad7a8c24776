//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result, TrackerError};

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Enable foreign keys for this connection
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        // Execute the schema SQL
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        // Apply migrations for existing databases
        self.apply_migrations()?;

        Ok(())
    }

    /// Apply database migrations for existing databases
    fn apply_migrations(&self) -> Result<()> {
        // Check if technical_log column exists in order_items table
        let has_technical_log: bool = self
            .connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('order_items') WHERE name = 'technical_log'",
                [],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .unwrap_or(false);

        // Add technical_log column if it doesn't exist
        if !has_technical_log {
            self.connection
                .execute(
                    "ALTER TABLE order_items ADD COLUMN technical_log TEXT NOT NULL DEFAULT '[]'",
                    [],
                )
                .map_err(|e| {
                    TrackerError::database_error(
                        "Failed to add technical_log column to order_items table",
                        e,
                    )
                })?;
        }

        Ok(())
    }
}

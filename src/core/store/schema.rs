//! Database schema initialization

use rusqlite::params;

use super::{Store, StoreError, SCHEMA_VERSION};

impl Store {
    /// Initialize database schema
    pub(super) fn init_schema(&mut self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            r#"
            -- Schema version tracking
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            );

            -- Item profiles. Every lookup is keyed by name, so name is UNIQUE.
            CREATE TABLE IF NOT EXISTS items (
                item_id INTEGER PRIMARY KEY AUTOINCREMENT,
                category TEXT NOT NULL,
                name TEXT NOT NULL UNIQUE,
                shelf_life_days INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_items_category ON items(category);

            -- Pantry stock, one row per stocked item.
            CREATE TABLE IF NOT EXISTS pantry (
                pantry_id INTEGER PRIMARY KEY AUTOINCREMENT,
                item_id INTEGER NOT NULL,
                quantity INTEGER NOT NULL,
                user_expiration TEXT,
                fallback_expiration TEXT NOT NULL,
                FOREIGN KEY (item_id) REFERENCES items(item_id)
            );
            CREATE INDEX IF NOT EXISTS idx_pantry_item ON pantry(item_id);
            CREATE INDEX IF NOT EXISTS idx_pantry_user_expiration ON pantry(user_expiration);

            -- Shopping list.
            CREATE TABLE IF NOT EXISTS shopping_list (
                sl_id INTEGER PRIMARY KEY AUTOINCREMENT,
                item_id INTEGER NOT NULL,
                quantity INTEGER NOT NULL,
                FOREIGN KEY (item_id) REFERENCES items(item_id)
            );
            CREATE INDEX IF NOT EXISTS idx_shopping_item ON shopping_list(item_id);

            -- Notification settings. Exactly one row, repaired on open.
            CREATE TABLE IF NOT EXISTS settings (
                settings_id INTEGER PRIMARY KEY AUTOINCREMENT,
                use_user_expiration INTEGER NOT NULL DEFAULT 0,
                lookback_days INTEGER NOT NULL DEFAULT 1,
                auto_populate INTEGER NOT NULL DEFAULT 0
            );
            "#,
        )?;

        // Set schema version
        self.conn.execute(
            "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
            params![SCHEMA_VERSION],
        )?;

        Ok(())
    }
}

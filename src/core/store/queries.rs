//! Typed query and update methods over the store
//!
//! The query set mirrors the access patterns of the CLI and the daily
//! tick: name-keyed lookups, pantry/shopping joins against item profiles,
//! and the by-date query the evaluator and replenishment policy share.
//! Date parameters are compared as exact `YYYY-MM-DD` strings.

use rusqlite::{params, OptionalExtension};

use super::{
    Item, PantryEntry, PantryItemInfo, Settings, ShoppingEntry, ShoppingItemInfo, Store,
    StoreError,
};

impl Store {
    // ===== items =====

    /// Insert an item profile, returning its id.
    pub fn insert_item(
        &self,
        category: &str,
        name: &str,
        shelf_life_days: i64,
    ) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO items (category, name, shelf_life_days) VALUES (?1, ?2, ?3)",
            params![category, name, shelf_life_days],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Look up an item id by name.
    pub fn item_id(&self, name: &str) -> Result<Option<i64>, StoreError> {
        Ok(self
            .conn
            .query_row(
                "SELECT item_id FROM items WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?)
    }

    /// Fetch an item profile by name.
    pub fn get_item(&self, name: &str) -> Result<Option<Item>, StoreError> {
        Ok(self
            .conn
            .query_row(
                "SELECT item_id, category, name, shelf_life_days FROM items WHERE name = ?1",
                params![name],
                |row| {
                    Ok(Item {
                        item_id: row.get(0)?,
                        category: row.get(1)?,
                        name: row.get(2)?,
                        shelf_life_days: row.get(3)?,
                    })
                },
            )
            .optional()?)
    }

    pub fn item_exists(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.item_id(name)?.is_some())
    }

    /// All item profiles, ordered by name.
    pub fn list_items(&self) -> Result<Vec<Item>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT item_id, category, name, shelf_life_days FROM items ORDER BY name",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Item {
                item_id: row.get(0)?,
                category: row.get(1)?,
                name: row.get(2)?,
                shelf_life_days: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Distinct categories across all item profiles.
    pub fn categories(&self) -> Result<Vec<String>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT category FROM items ORDER BY category")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Update an item's default shelf life.
    pub fn set_shelf_life(&self, name: &str, shelf_life_days: i64) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "UPDATE items SET shelf_life_days = ?1 WHERE name = ?2",
            params![shelf_life_days, name],
        )?;
        if changed == 0 {
            return Err(StoreError::UnknownItem(name.to_string()));
        }
        Ok(())
    }

    /// Delete an item profile by name.
    pub fn remove_item(&self, name: &str) -> Result<(), StoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM items WHERE name = ?1", params![name])?;
        if changed == 0 {
            return Err(StoreError::UnknownItem(name.to_string()));
        }
        Ok(())
    }

    // ===== pantry =====

    /// Insert a pantry row.
    pub fn insert_pantry(
        &self,
        item_id: i64,
        quantity: i64,
        user_expiration: Option<&str>,
        fallback_expiration: &str,
    ) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO pantry (item_id, quantity, user_expiration, fallback_expiration) VALUES (?1, ?2, ?3, ?4)",
            params![item_id, quantity, user_expiration, fallback_expiration],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All pantry rows joined with their item profiles, ordered by name.
    pub fn pantry_overview(&self) -> Result<Vec<PantryItemInfo>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT i.category, i.name, p.quantity, p.user_expiration, p.fallback_expiration
             FROM pantry p JOIN items i USING(item_id)
             ORDER BY i.name",
        )?;
        let rows = stmt.query_map([], Self::pantry_info_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Pantry rows whose user expiration equals the given date string.
    ///
    /// This is the query both the evaluator and the replenishment policy
    /// run; `date` must already be in `YYYY-MM-DD` form.
    pub fn pantry_by_date(&self, date: &str) -> Result<Vec<PantryItemInfo>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT i.category, i.name, p.quantity, p.user_expiration, p.fallback_expiration
             FROM pantry p JOIN items i USING(item_id)
             WHERE p.user_expiration = ?1
             ORDER BY i.name",
        )?;
        let rows = stmt.query_map(params![date], Self::pantry_info_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// One pantry row by item name.
    pub fn pantry_item(&self, name: &str) -> Result<Option<PantryItemInfo>, StoreError> {
        Ok(self
            .conn
            .query_row(
                "SELECT i.category, i.name, p.quantity, p.user_expiration, p.fallback_expiration
                 FROM pantry p JOIN items i USING(item_id)
                 WHERE i.name = ?1",
                params![name],
                Self::pantry_info_row,
            )
            .optional()?)
    }

    pub fn pantry_exists(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.pantry_item(name)?.is_some())
    }

    /// Current pantry quantity for an item name.
    pub fn pantry_quantity(&self, name: &str) -> Result<Option<i64>, StoreError> {
        Ok(self
            .conn
            .query_row(
                "SELECT p.quantity FROM pantry p JOIN items i USING(item_id) WHERE i.name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?)
    }

    /// Set the pantry quantity for an item name.
    pub fn set_pantry_quantity(&self, name: &str, quantity: i64) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "UPDATE pantry SET quantity = ?1
             WHERE item_id IN (SELECT item_id FROM items WHERE name = ?2)",
            params![quantity, name],
        )?;
        if changed == 0 {
            return Err(StoreError::UnknownItem(name.to_string()));
        }
        Ok(())
    }

    /// Set the user expiration date for an item name.
    pub fn set_pantry_expiration(&self, name: &str, date: &str) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "UPDATE pantry SET user_expiration = ?1
             WHERE item_id IN (SELECT item_id FROM items WHERE name = ?2)",
            params![date, name],
        )?;
        if changed == 0 {
            return Err(StoreError::UnknownItem(name.to_string()));
        }
        Ok(())
    }

    /// Delete the pantry row for an item name.
    pub fn delete_pantry(&self, name: &str) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "DELETE FROM pantry
             WHERE item_id IN (SELECT item_id FROM items WHERE name = ?1)",
            params![name],
        )?;
        if changed == 0 {
            return Err(StoreError::UnknownItem(name.to_string()));
        }
        Ok(())
    }

    /// Raw pantry rows, mostly for diagnostics.
    pub fn pantry_rows(&self) -> Result<Vec<PantryEntry>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT pantry_id, item_id, quantity, user_expiration, fallback_expiration FROM pantry",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(PantryEntry {
                pantry_id: row.get(0)?,
                item_id: row.get(1)?,
                quantity: row.get(2)?,
                user_expiration: row.get(3)?,
                fallback_expiration: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    // ===== shopping list =====

    /// Insert a shopping row.
    pub fn insert_shopping(&self, item_id: i64, quantity: i64) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO shopping_list (item_id, quantity) VALUES (?1, ?2)",
            params![item_id, quantity],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All shopping rows joined with their item profiles, ordered by name.
    pub fn shopping_overview(&self) -> Result<Vec<ShoppingItemInfo>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT i.category, i.name, sl.quantity
             FROM shopping_list sl JOIN items i USING(item_id)
             ORDER BY i.name",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(ShoppingItemInfo {
                category: row.get(0)?,
                name: row.get(1)?,
                quantity: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn shopping_exists(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.shopping_quantity(name)?.is_some())
    }

    /// Current shopping quantity for an item name.
    pub fn shopping_quantity(&self, name: &str) -> Result<Option<i64>, StoreError> {
        Ok(self
            .conn
            .query_row(
                "SELECT sl.quantity FROM shopping_list sl JOIN items i USING(item_id) WHERE i.name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?)
    }

    /// Set the shopping quantity for an item name.
    pub fn set_shopping_quantity(&self, name: &str, quantity: i64) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "UPDATE shopping_list SET quantity = ?1
             WHERE item_id IN (SELECT item_id FROM items WHERE name = ?2)",
            params![quantity, name],
        )?;
        if changed == 0 {
            return Err(StoreError::UnknownItem(name.to_string()));
        }
        Ok(())
    }

    /// Delete every shopping row for an item name.
    pub fn remove_shopping(&self, name: &str) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "DELETE FROM shopping_list
             WHERE item_id IN (SELECT item_id FROM items WHERE name = ?1)",
            params![name],
        )?;
        if changed == 0 {
            return Err(StoreError::UnknownItem(name.to_string()));
        }
        Ok(())
    }

    /// Raw shopping rows, mostly for diagnostics.
    pub fn shopping_rows(&self) -> Result<Vec<ShoppingEntry>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT sl_id, item_id, quantity FROM shopping_list")?;
        let rows = stmt.query_map([], |row| {
            Ok(ShoppingEntry {
                sl_id: row.get(0)?,
                item_id: row.get(1)?,
                quantity: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    // ===== settings =====

    /// The settings row. `Store::open` guarantees it exists.
    pub fn settings(&self) -> Result<Settings, StoreError> {
        Ok(self.conn.query_row(
            "SELECT use_user_expiration, lookback_days, auto_populate FROM settings LIMIT 1",
            [],
            |row| {
                Ok(Settings {
                    use_user_expiration: row.get::<_, i64>(0)? != 0,
                    lookback_days: row.get(1)?,
                    auto_populate: row.get::<_, i64>(2)? != 0,
                })
            },
        )?)
    }

    pub fn set_use_user_expiration(&self, enabled: bool) -> Result<(), StoreError> {
        self.conn.execute(
            "UPDATE settings SET use_user_expiration = ?1",
            params![enabled as i64],
        )?;
        Ok(())
    }

    pub fn set_lookback_days(&self, days: i64) -> Result<(), StoreError> {
        self.conn
            .execute("UPDATE settings SET lookback_days = ?1", params![days])?;
        Ok(())
    }

    pub fn set_auto_populate(&self, enabled: bool) -> Result<(), StoreError> {
        self.conn.execute(
            "UPDATE settings SET auto_populate = ?1",
            params![enabled as i64],
        )?;
        Ok(())
    }

    // ===== maintenance =====

    /// Clear items, pantry, and shopping tables. Settings are retained.
    pub fn reset(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "DELETE FROM shopping_list; DELETE FROM pantry; DELETE FROM items;",
        )?;
        Ok(())
    }

    fn pantry_info_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PantryItemInfo> {
        Ok(PantryItemInfo {
            category: row.get(0)?,
            name: row.get(1)?,
            quantity: row.get(2)?,
            user_expiration: row.get(3)?,
            fallback_expiration: row.get(4)?,
        })
    }
}

//! SQLite-backed relational store
//!
//! The store is the system of record for items, pantry stock, the shopping
//! list, and notification settings. It is constructed explicitly from a
//! `Home` and passed by reference to whatever needs it; there is no global
//! handle. WAL mode plus a busy timeout let a `tick --watch` process and
//! interactive commands touch the same database concurrently.

mod queries;
mod schema;
mod types;

pub use types::*;

use std::fs;
use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, OptionalExtension};
use thiserror::Error;

use crate::core::home::Home;

/// Current schema version. The store holds real data, so a mismatch is
/// surfaced as an error instead of a drop-and-rebuild.
const SCHEMA_VERSION: i32 = 1;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(#[from] rusqlite::Error),

    #[error("store schema is version {found}, this build expects {expected}; back up and re-run `larder init` in a fresh directory")]
    SchemaVersion { found: i32, expected: i32 },

    #[error("no item profile named '{0}'")]
    UnknownItem(String),
}

/// Handle to the household's SQLite store
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the store for a household.
    pub fn open(home: &Home) -> Result<Self, StoreError> {
        Self::open_at(&home.store_path())
    }

    /// Open (or create) a store at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        let needs_init = !path.exists();
        let conn = Connection::open(path)?;
        Self::from_connection(conn, needs_init)
    }

    /// Open a throwaway in-memory store. Used by tests and nothing else.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn, true)
    }

    fn from_connection(conn: Connection, needs_init: bool) -> Result<Self, StoreError> {
        // WAL for concurrent readers, busy timeout so a tick and an
        // interactive command can overlap without immediate SQLITE_BUSY.
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        conn.busy_timeout(Duration::from_secs(5))?;

        let mut store = Self { conn };

        if needs_init {
            store.init_schema()?;
        } else {
            store.check_schema_version()?;
        }
        store.repair_settings_row()?;

        Ok(store)
    }

    fn check_schema_version(&self) -> Result<(), StoreError> {
        let found: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?
            .unwrap_or(0);

        if found != SCHEMA_VERSION {
            return Err(StoreError::SchemaVersion {
                found,
                expected: SCHEMA_VERSION,
            });
        }
        Ok(())
    }

    /// Enforce the settings-table invariant: exactly one row. Zero rows get
    /// the defaults inserted; extras beyond the first are removed.
    fn repair_settings_row(&mut self) -> Result<(), StoreError> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM settings", [], |row| row.get(0))?;

        if count == 0 {
            let defaults = Settings::default();
            self.conn.execute(
                "INSERT INTO settings (use_user_expiration, lookback_days, auto_populate) VALUES (?1, ?2, ?3)",
                rusqlite::params![
                    defaults.use_user_expiration as i64,
                    defaults.lookback_days,
                    defaults.auto_populate as i64
                ],
            )?;
        } else if count > 1 {
            self.conn.execute(
                "DELETE FROM settings WHERE settings_id NOT IN (SELECT MIN(settings_id) FROM settings)",
                [],
            )?;
        }
        Ok(())
    }

    /// Number of rows in a known table.
    pub fn count_rows(&self, table: &str) -> Result<i64, StoreError> {
        // Interpolating an identifier, so restrict to the known tables.
        let table = match table {
            "items" | "pantry" | "shopping_list" | "settings" => table,
            other => {
                return Err(StoreError::Unavailable(
                    rusqlite::Error::InvalidParameterName(other.to_string()),
                ))
            }
        };
        let count = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })?;
        Ok(count)
    }

    /// Store statistics for `larder store status`.
    pub fn statistics(&self, db_path: &Path) -> Result<StoreStats, StoreError> {
        Ok(StoreStats {
            items: self.count_rows("items")? as usize,
            pantry_entries: self.count_rows("pantry")? as usize,
            shopping_entries: self.count_rows("shopping_list")? as usize,
            db_size_bytes: fs::metadata(db_path).map(|m| m.len()).unwrap_or(0),
        })
    }

    /// Execute an arbitrary read-only query, stringifying every column.
    pub fn query_raw(&self, sql: &str) -> Result<Vec<Vec<String>>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let column_count = stmt.column_count();

        let rows = stmt.query_map([], |row| {
            let mut values = Vec::with_capacity(column_count);
            for i in 0..column_count {
                let value: String = row
                    .get::<_, rusqlite::types::Value>(i)
                    .map(|v| match v {
                        rusqlite::types::Value::Null => "NULL".to_string(),
                        rusqlite::types::Value::Integer(i) => i.to_string(),
                        rusqlite::types::Value::Real(f) => f.to_string(),
                        rusqlite::types::Value::Text(s) => s,
                        rusqlite::types::Value::Blob(_) => "<blob>".to_string(),
                    })
                    .unwrap_or_default();
                values.push(value);
            }
            Ok(values)
        })?;

        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Column names produced by an arbitrary query.
    pub fn query_columns(&self, sql: &str) -> Result<Vec<String>, StoreError> {
        let stmt = self.conn.prepare(sql)?;
        Ok(stmt.column_names().iter().map(|s| s.to_string()).collect())
    }
}

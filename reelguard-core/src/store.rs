//! Persisted sensitivity store
//!
//! SQLite-backed key→level table keyed by content id. Records are written
//! once on first successful resolution and never updated or deleted: an
//! observed rating is treated as an immutable fact, so the table grows
//! without bound. That is a documented limitation of the design, not an
//! accident — do not add eviction here without revisiting the resolver's
//! cache-hit contract.

use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::Mutex;

use crate::errors::{ReelguardError, Result};
use crate::sensitivity::SensitivityLevel;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS sensitivity_cache (
    content_id TEXT PRIMARY KEY,
    level      INTEGER NOT NULL
);
"#;

/// Durable sensitivity store shared across request threads.
///
/// The connection is guarded by a mutex; the only write path is an
/// idempotent insert, so concurrent first-time resolutions of the same id
/// race harmlessly (the first row wins and stays authoritative).
pub struct SensitivityStore {
    conn: Mutex<Connection>,
}

impl SensitivityStore {
    /// Open (creating if needed) the store at `path` and apply the schema.
    pub fn connect_and_init_at_path(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ReelguardError::store_with_source(
                    format!("failed to create store directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        let conn = Connection::open(path).map_err(|e| {
            ReelguardError::store_with_source(
                format!("failed to open store at {}", path.display()),
                e,
            )
        })?;

        Self::apply_schema(&conn)?;

        tracing::debug!(path = %path.display(), "sensitivity store initialized");

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory store (for testing).
    pub fn connect_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            ReelguardError::store_with_source("failed to open in-memory store", e)
        })?;

        Self::apply_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn apply_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| ReelguardError::store_with_source("failed to apply schema", e))?;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| ReelguardError::store("store mutex poisoned"))
    }

    /// Point lookup by content id.
    pub fn lookup(&self, content_id: &str) -> Result<Option<SensitivityLevel>> {
        let conn = self.lock()?;
        let raw: Option<i64> = conn
            .query_row(
                "SELECT level FROM sensitivity_cache WHERE content_id = ?1",
                params![content_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| ReelguardError::store_with_source("failed to query store", e))?;

        Ok(raw.map(|v| {
            SensitivityLevel::from_i64(v).unwrap_or_else(|| {
                tracing::warn!(content_id, level = v, "out-of-range level in store");
                SensitivityLevel::Severe
            })
        }))
    }

    /// Insert a record unless one already exists for `content_id`.
    ///
    /// A concurrent writer landing first is not an error; the existing
    /// record remains authoritative.
    pub fn insert_if_absent(&self, content_id: &str, level: SensitivityLevel) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR IGNORE INTO sensitivity_cache (content_id, level) VALUES (?1, ?2)",
            params![content_id, level.as_i64()],
        )
        .map_err(|e| ReelguardError::store_with_source("failed to insert record", e))?;
        Ok(())
    }

    /// Number of persisted records.
    pub fn record_count(&self) -> Result<i64> {
        let conn = self.lock()?;
        conn.query_row("SELECT COUNT(*) FROM sensitivity_cache", [], |row| {
            row.get(0)
        })
        .map_err(|e| ReelguardError::store_with_source("failed to count records", e))
    }
}

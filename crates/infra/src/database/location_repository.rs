//! SQLite-backed implementation of the `LocationRepository` port.

use std::sync::Arc;

use dueline_core::LocationRepository as LocationRepositoryPort;
use dueline_domain::{Location, Result};
use rusqlite::OptionalExtension;

use super::manager::{map_sql_error, DbManager};

/// SQLite-backed store for service-location records.
pub struct SqliteLocationRepository {
    db: Arc<DbManager>,
}

impl SqliteLocationRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Insert or replace one location record.
    pub fn save(&self, location: &Location) -> Result<()> {
        let conn = self.db.get_connection()?;
        conn.execute(
            "INSERT OR REPLACE INTO locations (id, timezone_id, utc_offset_hours)
             VALUES (?1, ?2, ?3)",
            rusqlite::params![location.id, location.timezone_id, location.utc_offset_hours],
        )
        .map_err(map_sql_error)?;
        Ok(())
    }
}

impl LocationRepositoryPort for SqliteLocationRepository {
    fn fetch_location(&self, id: &str) -> Result<Option<Location>> {
        let conn = self.db.get_connection()?;
        conn.query_row(
            "SELECT id, timezone_id, utc_offset_hours FROM locations WHERE id = ?1",
            rusqlite::params![id],
            |row| {
                Ok(Location {
                    id: row.get(0)?,
                    timezone_id: row.get(1)?,
                    utc_offset_hours: row.get(2)?,
                })
            },
        )
        .optional()
        .map_err(map_sql_error)
    }
}

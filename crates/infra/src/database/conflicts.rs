//! Scheduled-visit implementation of the `ConflictProvider` port.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use dueline_core::ConflictProvider as ConflictProviderPort;
use dueline_domain::Result;
use rusqlite::params;
use rusqlite::types::Type;

use super::manager::{map_sql_error, DbManager};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQLite-backed view of the dates already committed per asset.
pub struct SqliteConflictProvider {
    db: Arc<DbManager>,
}

impl SqliteConflictProvider {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Record a committed visit for an asset.
    pub fn record_visit(&self, asset_id: &str, service_date: NaiveDate) -> Result<()> {
        let conn = self.db.get_connection()?;
        conn.execute(
            "INSERT OR REPLACE INTO scheduled_visits (asset_id, service_date) VALUES (?1, ?2)",
            params![asset_id, service_date.format(DATE_FORMAT).to_string()],
        )
        .map_err(map_sql_error)?;
        Ok(())
    }
}

impl ConflictProviderPort for SqliteConflictProvider {
    fn scheduled_dates(&self, asset_id: &str) -> Result<BTreeSet<NaiveDate>> {
        let conn = self.db.get_connection()?;
        let mut stmt = conn
            .prepare("SELECT service_date FROM scheduled_visits WHERE asset_id = ?1")
            .map_err(map_sql_error)?;

        let rows = stmt
            .query_map(params![asset_id], |row| {
                let raw: String = row.get(0)?;
                NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(|err| {
                    rusqlite::Error::FromSqlConversionFailure(
                        0,
                        Type::Text,
                        format!("invalid date '{raw}': {err}").into(),
                    )
                })
            })
            .map_err(map_sql_error)?;

        let mut dates = BTreeSet::new();
        for row in rows {
            dates.insert(row.map_err(map_sql_error)?);
        }
        Ok(dates)
    }
}

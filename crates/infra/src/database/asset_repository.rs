//! SQLite-backed implementation of the `AssetRepository` port.

use std::sync::Arc;

use dueline_core::AssetRepository as AssetRepositoryPort;
use dueline_domain::{Asset, Result};
use rusqlite::OptionalExtension;

use super::manager::{map_sql_error, DbManager};

/// SQLite-backed store for asset records.
pub struct SqliteAssetRepository {
    db: Arc<DbManager>,
}

impl SqliteAssetRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Insert or replace one asset record.
    pub fn save(&self, asset: &Asset) -> Result<()> {
        let conn = self.db.get_connection()?;
        conn.execute(
            "INSERT OR REPLACE INTO assets (id, product_family, capacity_vendor, capacity_site_id)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                asset.id,
                asset.product_family,
                asset.capacity_vendor,
                asset.capacity_site_id,
            ],
        )
        .map_err(map_sql_error)?;
        Ok(())
    }
}

impl AssetRepositoryPort for SqliteAssetRepository {
    fn fetch_asset(&self, id: &str) -> Result<Option<Asset>> {
        let conn = self.db.get_connection()?;
        conn.query_row(
            "SELECT id, product_family, capacity_vendor, capacity_site_id
             FROM assets WHERE id = ?1",
            rusqlite::params![id],
            |row| {
                Ok(Asset {
                    id: row.get(0)?,
                    product_family: row.get(1)?,
                    capacity_vendor: row.get(2)?,
                    capacity_site_id: row.get(3)?,
                })
            },
        )
        .optional()
        .map_err(map_sql_error)
    }
}

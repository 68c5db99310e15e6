//! SQLite-backed implementation of the `FieldMapRepository` port.

use std::sync::Arc;

use dueline_core::FieldMapRepository as FieldMapRepositoryPort;
use dueline_domain::{FieldMappingRule, Result};

use super::manager::{map_sql_error, DbManager};

/// SQLite-backed store for the field-mapping rule set.
///
/// Rules are returned in `position` order so matching stays stable across
/// runs regardless of insertion order.
pub struct SqliteFieldMapRepository {
    db: Arc<DbManager>,
}

impl SqliteFieldMapRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Insert or replace one mapping rule at the given position.
    pub fn save(&self, rule: &FieldMappingRule, position: i64) -> Result<()> {
        let conn = self.db.get_connection()?;
        conn.execute(
            "INSERT OR REPLACE INTO field_mapping_rules
                (priority_code, label, source_path, target_field, position)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                rule.priority_code,
                rule.label,
                rule.source_path,
                rule.target_field,
                position,
            ],
        )
        .map_err(map_sql_error)?;
        Ok(())
    }
}

impl FieldMapRepositoryPort for SqliteFieldMapRepository {
    fn fetch_mapping_rules(&self) -> Result<Vec<FieldMappingRule>> {
        let conn = self.db.get_connection()?;
        let mut stmt = conn
            .prepare(
                "SELECT priority_code, label, source_path, target_field
                 FROM field_mapping_rules ORDER BY position, priority_code",
            )
            .map_err(map_sql_error)?;

        let rows = stmt
            .query_map([], |row| {
                Ok(FieldMappingRule {
                    priority_code: row.get(0)?,
                    label: row.get(1)?,
                    source_path: row.get(2)?,
                    target_field: row.get(3)?,
                })
            })
            .map_err(map_sql_error)?;

        let mut rules = Vec::new();
        for row in rows {
            rules.push(row.map_err(map_sql_error)?);
        }
        Ok(rules)
    }
}

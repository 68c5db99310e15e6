//! SQLite-backed implementation of the `EntitlementRepository` port.
//!
//! The fetch query pushes the approval, validity-window and account-scope
//! predicates into SQL so callers only ever see in-scope candidates.
//! Wildcard entitlements (NULL account) are always returned alongside the
//! requested accounts.

use std::sync::Arc;

use chrono::NaiveDate;
use dueline_core::EntitlementRepository as EntitlementRepositoryPort;
use dueline_domain::{
    CutoffDirection, DuelineError, Entitlement, EntitlementQuery, GuaranteeUnit, Result,
};
use rusqlite::types::Type;
use rusqlite::Row;

use super::manager::{map_sql_error, DbManager};

const DATE_FORMAT: &str = "%Y-%m-%d";

const ENTITLEMENT_COLUMNS: &str = "id, account_id, valid_from, valid_to, approved, \
    guarantee_unit, guarantee_value, cutoff_hour, cutoff_direction, weekdays, \
    override_business_hours, gold_standard, contractual, service_type, service_sub_type, \
    service_reason, product_family";

/// SQLite-backed repository for entitlement candidates.
pub struct SqliteEntitlementRepository {
    db: Arc<DbManager>,
}

impl SqliteEntitlementRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Insert or replace one entitlement record.
    pub fn save(&self, entitlement: &Entitlement) -> Result<()> {
        let conn = self.db.get_connection()?;

        let weekdays = serde_json::to_string(&entitlement.weekdays)
            .map_err(|err| DuelineError::Database(format!("failed to encode weekdays: {err}")))?;
        let unit = match entitlement.guarantee_unit {
            GuaranteeUnit::Days => "Days",
            GuaranteeUnit::Hours => "Hours",
        };
        let direction = entitlement.cutoff_direction.as_ref().map(|d| match d {
            CutoffDirection::Before => "Before",
            CutoffDirection::After => "After",
        });

        conn.execute(
            "INSERT OR REPLACE INTO entitlements (
                id, account_id, valid_from, valid_to, approved, guarantee_unit,
                guarantee_value, cutoff_hour, cutoff_direction, weekdays,
                override_business_hours, gold_standard, contractual, service_type,
                service_sub_type, service_reason, product_family
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
            rusqlite::params![
                entitlement.id,
                entitlement.account_id,
                entitlement.valid_from.format(DATE_FORMAT).to_string(),
                entitlement.valid_to.format(DATE_FORMAT).to_string(),
                entitlement.approved,
                unit,
                entitlement.guarantee_value,
                entitlement.cutoff_hour,
                direction,
                weekdays,
                entitlement.override_business_hours,
                entitlement.gold_standard,
                entitlement.contractual,
                entitlement.service_type,
                entitlement.service_sub_type,
                entitlement.service_reason,
                entitlement.product_family,
            ],
        )
        .map_err(map_sql_error)?;

        Ok(())
    }
}

impl EntitlementRepositoryPort for SqliteEntitlementRepository {
    fn fetch_entitlements(&self, query: &EntitlementQuery) -> Result<Vec<Entitlement>> {
        let conn = self.db.get_connection()?;

        let mut sql = format!(
            "SELECT {ENTITLEMENT_COLUMNS} FROM entitlements \
             WHERE approved = 1 AND valid_from <= ?1 AND valid_to >= ?1 \
             AND (account_id IS NULL"
        );
        if !query.account_ids.is_empty() {
            let placeholders: Vec<String> =
                (0..query.account_ids.len()).map(|i| format!("?{}", i + 2)).collect();
            sql.push_str(&format!(" OR account_id IN ({})", placeholders.join(", ")));
        }
        sql.push_str(") ORDER BY id");

        let mut params: Vec<String> = vec![query.not_before.format(DATE_FORMAT).to_string()];
        params.extend(query.account_ids.iter().cloned());

        let mut stmt = conn.prepare(&sql).map_err(map_sql_error)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(params), entitlement_from_row)
            .map_err(map_sql_error)?;

        let mut entitlements = Vec::new();
        for row in rows {
            entitlements.push(row.map_err(map_sql_error)?);
        }
        Ok(entitlements)
    }
}

fn entitlement_from_row(row: &Row<'_>) -> rusqlite::Result<Entitlement> {
    let valid_from: String = row.get(2)?;
    let valid_to: String = row.get(3)?;
    let unit: String = row.get(5)?;
    let direction: Option<String> = row.get(8)?;
    let weekdays: String = row.get(9)?;

    Ok(Entitlement {
        id: row.get(0)?,
        account_id: row.get(1)?,
        valid_from: parse_date(2, &valid_from)?,
        valid_to: parse_date(3, &valid_to)?,
        approved: row.get(4)?,
        guarantee_unit: match unit.as_str() {
            "Days" => GuaranteeUnit::Days,
            "Hours" => GuaranteeUnit::Hours,
            other => return Err(conversion_error(5, format!("unknown guarantee unit: {other}"))),
        },
        guarantee_value: row.get(6)?,
        cutoff_hour: row.get(7)?,
        cutoff_direction: match direction.as_deref() {
            None => None,
            Some("Before") => Some(CutoffDirection::Before),
            Some("After") => Some(CutoffDirection::After),
            Some(other) => {
                return Err(conversion_error(8, format!("unknown cutoff direction: {other}")))
            }
        },
        weekdays: serde_json::from_str(&weekdays)
            .map_err(|err| conversion_error(9, format!("invalid weekday list: {err}")))?,
        override_business_hours: row.get(10)?,
        gold_standard: row.get(11)?,
        contractual: row.get(12)?,
        service_type: row.get(13)?,
        service_sub_type: row.get(14)?,
        service_reason: row.get(15)?,
        product_family: row.get(16)?,
    })
}

fn parse_date(index: usize, raw: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|err| conversion_error(index, format!("invalid date '{raw}': {err}")))
}

fn conversion_error(index: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, message.into())
}

//! Holiday-table implementation of the `BusinessCalendar` port.
//!
//! A date is a business day when it is a weekday and not present in the
//! holidays table. Weekend days never hit the database.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};
use dueline_core::BusinessCalendar as BusinessCalendarPort;
use dueline_domain::Result;
use rusqlite::params;

use super::manager::{map_sql_error, DbManager};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQLite-backed business calendar: weekdays minus configured holidays.
pub struct SqliteBusinessCalendar {
    db: Arc<DbManager>,
}

impl SqliteBusinessCalendar {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Record one holiday.
    pub fn add_holiday(&self, date: NaiveDate, name: Option<&str>) -> Result<()> {
        let conn = self.db.get_connection()?;
        conn.execute(
            "INSERT OR REPLACE INTO holidays (holiday_date, name) VALUES (?1, ?2)",
            params![date.format(DATE_FORMAT).to_string(), name],
        )
        .map_err(map_sql_error)?;
        Ok(())
    }
}

impl BusinessCalendarPort for SqliteBusinessCalendar {
    fn is_business_day(&self, date: NaiveDate) -> Result<bool> {
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            return Ok(false);
        }

        let conn = self.db.get_connection()?;
        let is_holiday: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM holidays WHERE holiday_date = ?1)",
                params![date.format(DATE_FORMAT).to_string()],
                |row| row.get(0),
            )
            .map_err(map_sql_error)?;

        Ok(!is_holiday)
    }
}

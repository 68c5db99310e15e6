//! Business-day adjustment.

use chrono::NaiveDate;
use dueline_domain::{DuelineError, Result};

use super::ports::BusinessCalendar;

/// Advance `date` until the calendar reports a business day.
///
/// The loop has no fixed iteration cap; it is bounded in practice by
/// calendar configuration (a weekly cycle plus stacked holidays). The
/// adjustment never moves a date backwards.
pub fn adjust_forward(date: NaiveDate, calendar: &dyn BusinessCalendar) -> Result<NaiveDate> {
    let mut current = date;
    while !calendar.is_business_day(current)? {
        current = current
            .succ_opt()
            .ok_or_else(|| DuelineError::Calculation("date overflow during business-day adjustment".into()))?;
    }
    Ok(current)
}

/// Adjust unless the entitlement overrides business hours, in which case
/// weekend and holiday service dates are permitted as-is.
pub fn adjust_unless_overridden(
    date: NaiveDate,
    override_business_hours: bool,
    calendar: &dyn BusinessCalendar,
) -> Result<NaiveDate> {
    if override_business_hours {
        return Ok(date);
    }
    adjust_forward(date, calendar)
}

//! Raw SLA date arithmetic.

use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};
use dueline_domain::constants::DEFAULT_CUTOFF_HOUR;
use dueline_domain::{Entitlement, GuaranteeUnit, Location};

use super::timezone;

/// Raw calculation output, before business-day adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlaCalculation {
    pub days_delta: i64,
    pub raw_timestamp: DateTime<Utc>,
    pub raw_date: NaiveDate,
}

/// Converts an entitlement's guarantee into a raw commitment timestamp,
/// adjusted for the default daily cutoff.
pub struct SlaDateCalculator;

impl SlaDateCalculator {
    /// Whole days represented by a guarantee: Days floor the value directly,
    /// Hours floor after dividing by 24.
    pub fn days_delta(unit: GuaranteeUnit, value: f64) -> i64 {
        match unit {
            GuaranteeUnit::Days => value.floor() as i64,
            GuaranteeUnit::Hours => (value / 24.0).floor() as i64,
        }
    }

    /// Raw commitment for a request created at `created_at`.
    ///
    /// When the entitlement defines no explicit cutoff, the default policy
    /// applies: a request created at or after 2 PM location-local time loses
    /// the remainder of the day and the delta grows by one. An explicit
    /// cutoff was already enforced by the time-window filter, so no further
    /// adjustment happens here.
    pub fn calculate(
        entitlement: &Entitlement,
        created_at: DateTime<Utc>,
        location: Option<&Location>,
    ) -> SlaCalculation {
        let mut days_delta =
            Self::days_delta(entitlement.guarantee_unit, entitlement.guarantee_value);

        let has_explicit_cutoff =
            entitlement.cutoff_hour.is_some() && entitlement.cutoff_direction.is_some();
        if !has_explicit_cutoff {
            let local = timezone::local_time(created_at, location);
            if local.hour() >= DEFAULT_CUTOFF_HOUR {
                days_delta += 1;
            }
        }

        let raw_timestamp = created_at + Duration::days(days_delta);
        SlaCalculation { days_delta, raw_timestamp, raw_date: raw_timestamp.date_naive() }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use dueline_domain::CutoffDirection;

    use super::*;

    fn entitlement(unit: GuaranteeUnit, value: f64) -> Entitlement {
        Entitlement {
            id: "E1".to_string(),
            account_id: None,
            valid_from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            valid_to: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            approved: true,
            guarantee_unit: unit,
            guarantee_value: value,
            cutoff_hour: None,
            cutoff_direction: None,
            weekdays: vec![],
            override_business_hours: false,
            gold_standard: false,
            contractual: false,
            service_type: None,
            service_sub_type: None,
            service_reason: None,
            product_family: None,
        }
    }

    #[test]
    fn hours_and_days_guarantees_are_equivalent() {
        assert_eq!(
            SlaDateCalculator::days_delta(GuaranteeUnit::Hours, 48.0),
            SlaDateCalculator::days_delta(GuaranteeUnit::Days, 2.0),
        );
        assert_eq!(SlaDateCalculator::days_delta(GuaranteeUnit::Hours, 30.0), 1);
        assert_eq!(SlaDateCalculator::days_delta(GuaranteeUnit::Days, 2.9), 2);
    }

    #[test]
    fn morning_request_keeps_the_plain_delta() {
        // Scenario: created Monday 10:00 local, {Days: 2} → Wednesday.
        let created = Utc.with_ymd_and_hms(2024, 6, 10, 10, 0, 0).single().unwrap();
        let calc =
            SlaDateCalculator::calculate(&entitlement(GuaranteeUnit::Days, 2.0), created, None);

        assert_eq!(calc.days_delta, 2);
        assert_eq!(calc.raw_date, NaiveDate::from_ymd_opt(2024, 6, 12).unwrap());
    }

    #[test]
    fn after_default_cutoff_adds_a_day() {
        // Scenario: created Friday 15:30 local, {Hours: 24} → delta 1 + 1 → Sunday.
        let created = Utc.with_ymd_and_hms(2024, 6, 14, 15, 30, 0).single().unwrap();
        let calc =
            SlaDateCalculator::calculate(&entitlement(GuaranteeUnit::Hours, 24.0), created, None);

        assert_eq!(calc.days_delta, 2);
        assert_eq!(calc.raw_date, NaiveDate::from_ymd_opt(2024, 6, 16).unwrap());
    }

    #[test]
    fn default_cutoff_uses_location_local_time() {
        // 18:00 UTC is 13:00 in Chicago (CDT): still before the 2 PM cutoff.
        let chicago = Location {
            id: "LOC-1".to_string(),
            timezone_id: Some("America/Chicago".to_string()),
            utc_offset_hours: None,
        };
        let created = Utc.with_ymd_and_hms(2024, 6, 10, 18, 0, 0).single().unwrap();

        let calc = SlaDateCalculator::calculate(
            &entitlement(GuaranteeUnit::Days, 1.0),
            created,
            Some(&chicago),
        );
        assert_eq!(calc.days_delta, 1);

        // Without the location, 18:00 UTC is past the cutoff.
        let calc =
            SlaDateCalculator::calculate(&entitlement(GuaranteeUnit::Days, 1.0), created, None);
        assert_eq!(calc.days_delta, 2);
    }

    #[test]
    fn explicit_cutoff_is_not_double_applied() {
        let mut explicit = entitlement(GuaranteeUnit::Days, 1.0);
        explicit.cutoff_hour = Some(12);
        explicit.cutoff_direction = Some(CutoffDirection::Before);

        // 16:00 would trip the default cutoff, but the explicit one was
        // already enforced at filtering time.
        let created = Utc.with_ymd_and_hms(2024, 6, 10, 16, 0, 0).single().unwrap();
        let calc = SlaDateCalculator::calculate(&explicit, created, None);

        assert_eq!(calc.days_delta, 1);
    }
}

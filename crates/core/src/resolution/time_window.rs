//! Time-window and account-scope filtering.
//!
//! Filtering is purely exclusionary: no entitlement surviving this stage is
//! later rejected for timing reasons, and downstream stages assume this work
//! is already done.

use chrono::{Datelike, NaiveDateTime, Timelike};
use dueline_domain::{CutoffDirection, Entitlement};
use tracing::debug;

pub struct TimeWindowFilter;

impl TimeWindowFilter {
    /// Retain entitlements applicable right now for the given account.
    ///
    /// `local_now` is wall-clock time in the evaluation timezone (the
    /// request location's timezone when resolvable, UTC otherwise).
    pub fn retain_applicable(
        candidates: Vec<Entitlement>,
        account_id: Option<&str>,
        local_now: NaiveDateTime,
    ) -> Vec<Entitlement> {
        candidates
            .into_iter()
            .filter(|entitlement| Self::is_applicable(entitlement, account_id, local_now))
            .collect()
    }

    fn is_applicable(
        entitlement: &Entitlement,
        account_id: Option<&str>,
        local_now: NaiveDateTime,
    ) -> bool {
        if !entitlement.weekdays.is_empty()
            && !entitlement.weekdays.contains(&local_now.weekday())
        {
            debug!(entitlement_id = %entitlement.id, weekday = %local_now.weekday(), "excluded: weekday outside applicability set");
            return false;
        }

        if let (Some(cutoff_hour), Some(direction)) =
            (entitlement.cutoff_hour, entitlement.cutoff_direction)
        {
            let current_hour = local_now.hour();
            let excluded = match direction {
                CutoffDirection::Before => current_hour >= cutoff_hour,
                CutoffDirection::After => current_hour < cutoff_hour,
            };
            if excluded {
                debug!(
                    entitlement_id = %entitlement.id,
                    current_hour,
                    cutoff_hour,
                    ?direction,
                    "excluded: outside cutoff window"
                );
                return false;
            }
        }
        // A cutoff hour without a direction (or vice versa) is not a time
        // filter; the entitlement stays a candidate.

        match (&entitlement.account_id, account_id) {
            (None, _) => true,
            (Some(owner), Some(account)) => owner == account,
            (Some(_), None) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Weekday};
    use dueline_domain::GuaranteeUnit;

    use super::*;

    fn entitlement(id: &str) -> Entitlement {
        Entitlement {
            id: id.to_string(),
            account_id: None,
            valid_from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            valid_to: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            approved: true,
            guarantee_unit: GuaranteeUnit::Days,
            guarantee_value: 2.0,
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

    // Monday 2024-06-10, 10:00 local.
    fn monday_morning() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap().and_hms_opt(10, 0, 0).unwrap()
    }

    #[test]
    fn weekday_outside_set_is_excluded() {
        let mut tuesday_only = entitlement("E1");
        tuesday_only.weekdays = vec![Weekday::Tue];
        let mut monday_ok = entitlement("E2");
        monday_ok.weekdays = vec![Weekday::Mon, Weekday::Fri];

        let kept = TimeWindowFilter::retain_applicable(
            vec![tuesday_only, monday_ok],
            None,
            monday_morning(),
        );

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "E2");
    }

    #[test]
    fn empty_weekday_set_applies_every_day() {
        let kept =
            TimeWindowFilter::retain_applicable(vec![entitlement("E1")], None, monday_morning());
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn before_cutoff_excludes_once_hour_reached() {
        let mut before_noon = entitlement("E1");
        before_noon.cutoff_hour = Some(12);
        before_noon.cutoff_direction = Some(CutoffDirection::Before);

        let at_ten = TimeWindowFilter::retain_applicable(
            vec![before_noon.clone()],
            None,
            monday_morning(),
        );
        assert_eq!(at_ten.len(), 1);

        let at_noon = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap().and_hms_opt(12, 0, 0).unwrap();
        let kept = TimeWindowFilter::retain_applicable(vec![before_noon], None, at_noon);
        assert!(kept.is_empty());
    }

    #[test]
    fn after_cutoff_excludes_until_hour_reached() {
        let mut after_noon = entitlement("E1");
        after_noon.cutoff_hour = Some(12);
        after_noon.cutoff_direction = Some(CutoffDirection::After);

        let kept = TimeWindowFilter::retain_applicable(vec![after_noon], None, monday_morning());
        assert!(kept.is_empty());
    }

    #[test]
    fn absent_cutoff_is_not_a_time_filter() {
        let kept =
            TimeWindowFilter::retain_applicable(vec![entitlement("E1")], None, monday_morning());
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn account_scope_keeps_wildcard_and_exact_match_only() {
        let wildcard = entitlement("E1");
        let mut ours = entitlement("E2");
        ours.account_id = Some("ACC-1".to_string());
        let mut theirs = entitlement("E3");
        theirs.account_id = Some("ACC-2".to_string());

        let kept = TimeWindowFilter::retain_applicable(
            vec![wildcard, ours, theirs],
            Some("ACC-1"),
            monday_morning(),
        );

        let ids: Vec<_> = kept.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["E1", "E2"]);
    }

    #[test]
    fn customer_specific_entitlement_needs_an_account_on_the_request() {
        let mut scoped = entitlement("E1");
        scoped.account_id = Some("ACC-1".to_string());

        let kept = TimeWindowFilter::retain_applicable(vec![scoped], None, monday_morning());
        assert!(kept.is_empty());
    }
}

//! Entitlement query planning.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use dueline_domain::EntitlementQuery;

/// Builds the repository filter from the extraction pass's accumulators.
///
/// The fetch itself is delegated to the
/// [`EntitlementRepository`](super::ports::EntitlementRepository); only
/// currently-valid, approved entitlements scoped to the collected accounts
/// (plus industry-standard wildcards) should come back.
pub struct EntitlementQueryPlanner;

impl EntitlementQueryPlanner {
    pub fn plan(
        account_ids: &BTreeSet<String>,
        min_service_date: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> EntitlementQuery {
        EntitlementQuery {
            account_ids: account_ids.iter().cloned().collect(),
            not_before: min_service_date.unwrap_or_else(|| now.date_naive()),
        }
    }
}

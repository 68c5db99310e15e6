//! Candidate ordering and selection.
//!
//! One composite ordering covers every use: rank ascending, then the three
//! axis scores descending. The historical family of specialized comparators
//! collapsed into this single function.

use std::cmp::Ordering;

use dueline_domain::ScoredCandidate;

/// Scored candidates split for manual-selection UIs.
#[derive(Debug, Default)]
pub struct GroupedCandidates {
    /// Industry-standard (wildcard) entitlements, best first.
    pub industry_standard: Vec<ScoredCandidate>,
    /// Entitlements owned by the request's account, best first.
    pub customer_specific: Vec<ScoredCandidate>,
}

pub struct EntitlementSelector;

impl EntitlementSelector {
    /// The composite ordering: rank ascending, ties broken by descending
    /// customer, service, then transaction scores.
    pub fn compare(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
        a.priority_rank
            .cmp(&b.priority_rank)
            .then_with(|| b.customer_score.cmp(&a.customer_score))
            .then_with(|| b.service_score.cmp(&a.service_score))
            .then_with(|| b.transaction_score.cmp(&a.transaction_score))
    }

    /// Pick the single best candidate, or `None` for an empty set.
    ///
    /// An empty set is the only "not found" condition; a rank-7 candidate
    /// with zero scores is still a valid selection.
    pub fn select_best(mut candidates: Vec<ScoredCandidate>) -> Option<ScoredCandidate> {
        candidates.sort_by(Self::compare);
        candidates.into_iter().next()
    }

    /// Full sorted set, bucketed into wildcard vs customer-specific.
    pub fn grouped(mut candidates: Vec<ScoredCandidate>) -> GroupedCandidates {
        candidates.sort_by(Self::compare);

        let mut grouped = GroupedCandidates::default();
        for candidate in candidates {
            if candidate.entitlement.is_industry_standard() {
                grouped.industry_standard.push(candidate);
            } else {
                grouped.customer_specific.push(candidate);
            }
        }
        grouped
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use dueline_domain::{Entitlement, GuaranteeUnit};

    use super::*;

    fn candidate(id: &str, rank: u8, scores: (u32, u32, u32)) -> ScoredCandidate {
        ScoredCandidate {
            entitlement: Entitlement {
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
            },
            customer_score: scores.0,
            service_score: scores.1,
            transaction_score: scores.2,
            priority_rank: rank,
        }
    }

    #[test]
    fn lower_rank_wins() {
        // Scenario: full three-axis match beats customer-only.
        let best = EntitlementSelector::select_best(vec![
            candidate("B", 3, (5, 0, 0)),
            candidate("A", 0, (1, 1, 1)),
        ])
        .unwrap();
        assert_eq!(best.entitlement.id, "A");
    }

    #[test]
    fn rank_ties_break_on_scores_in_axis_order() {
        let best = EntitlementSelector::select_best(vec![
            candidate("LOW", 1, (2, 1, 0)),
            candidate("HIGH", 1, (3, 0, 0)),
        ])
        .unwrap();
        assert_eq!(best.entitlement.id, "HIGH");

        let best = EntitlementSelector::select_best(vec![
            candidate("SVC", 1, (2, 4, 0)),
            candidate("TXN", 1, (2, 1, 9)),
        ])
        .unwrap();
        assert_eq!(best.entitlement.id, "SVC");
    }

    #[test]
    fn empty_set_selects_none() {
        assert!(EntitlementSelector::select_best(vec![]).is_none());
    }

    #[test]
    fn grouped_buckets_by_account_scope_and_stays_sorted() {
        let mut scoped = candidate("C1", 2, (1, 0, 1));
        scoped.entitlement.account_id = Some("ACC-1".to_string());
        let mut scoped_better = candidate("C0", 0, (1, 1, 1));
        scoped_better.entitlement.account_id = Some("ACC-1".to_string());
        let wildcard = candidate("W1", 7, (0, 0, 0));

        let grouped = EntitlementSelector::grouped(vec![scoped, wildcard, scoped_better]);

        assert_eq!(grouped.industry_standard.len(), 1);
        let ids: Vec<_> =
            grouped.customer_specific.iter().map(|c| c.entitlement.id.as_str()).collect();
        assert_eq!(ids, vec!["C0", "C1"]);
    }
}

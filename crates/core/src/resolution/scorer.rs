//! Three-axis priority scoring.

use dueline_domain::types::mapping::axis_for_priority_code;
use dueline_domain::{Entitlement, MatchableField, PriorityAxis, ScoredCandidate};
use tracing::warn;

use super::accessor::FieldAccessorRegistry;

/// Scores entitlements against a request's matchable fields along the
/// customer, service and transaction axes and derives the priority rank.
pub struct PriorityScorer {
    registry: FieldAccessorRegistry,
}

impl PriorityScorer {
    pub fn new(registry: FieldAccessorRegistry) -> Self {
        Self { registry }
    }

    /// Score every candidate against the fields extracted for one request.
    ///
    /// A match occurs when the entitlement's target field equals the
    /// extracted value, or when the extracted value is present and the
    /// entitlement's field is absent (wildcard).
    pub fn score(
        &self,
        candidates: Vec<Entitlement>,
        fields: &[MatchableField],
    ) -> Vec<ScoredCandidate> {
        candidates
            .into_iter()
            .map(|entitlement| self.score_one(entitlement, fields))
            .collect()
    }

    fn score_one(&self, entitlement: Entitlement, fields: &[MatchableField]) -> ScoredCandidate {
        let mut customer_score = 0u32;
        let mut service_score = 0u32;
        let mut transaction_score = 0u32;
        let mut hits = (false, false, false);

        for field in fields {
            let Some(axis) = axis_for_priority_code(&field.priority_code) else {
                continue;
            };

            let Some(entitlement_value) =
                self.registry.entitlement_value(&field.target_field, &entitlement)
            else {
                warn!(
                    target_field = %field.target_field,
                    "mapping rule targets an unknown entitlement field; skipping"
                );
                continue;
            };

            let matched = match (&field.value, &entitlement_value) {
                (Some(extracted), Some(expected)) => extracted == expected,
                (Some(_), None) => true, // entitlement wildcard
                (None, _) => false,
            };

            if matched {
                match axis {
                    PriorityAxis::Customer => {
                        customer_score += 1;
                        hits.0 = true;
                    }
                    PriorityAxis::Service => {
                        service_score += 1;
                        hits.1 = true;
                    }
                    PriorityAxis::Transaction => {
                        transaction_score += 1;
                        hits.2 = true;
                    }
                }
            }
        }

        ScoredCandidate {
            entitlement,
            customer_score,
            service_score,
            transaction_score,
            priority_rank: Self::rank(hits.0, hits.1, hits.2),
        }
    }

    /// Rank from the three axis-hit flags; lower is more specific.
    ///
    /// (C,S,T)=(1,1,1) → 0 down through (0,0,0) → 7.
    pub fn rank(customer: bool, service: bool, transaction: bool) -> u8 {
        (u8::from(!customer) << 2) | (u8::from(!service) << 1) | u8::from(!transaction)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
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

    fn field(code: &str, target: &str, value: Option<&str>) -> MatchableField {
        MatchableField {
            request_id: "R1".to_string(),
            priority_code: code.to_string(),
            target_field: target.to_string(),
            value: value.map(str::to_string),
        }
    }

    #[test]
    fn rank_table_matches_axis_hits() {
        assert_eq!(PriorityScorer::rank(true, true, true), 0);
        assert_eq!(PriorityScorer::rank(true, true, false), 1);
        assert_eq!(PriorityScorer::rank(true, false, true), 2);
        assert_eq!(PriorityScorer::rank(true, false, false), 3);
        assert_eq!(PriorityScorer::rank(false, true, true), 4);
        assert_eq!(PriorityScorer::rank(false, true, false), 5);
        assert_eq!(PriorityScorer::rank(false, false, true), 6);
        assert_eq!(PriorityScorer::rank(false, false, false), 7);
    }

    #[test]
    fn exact_match_scores_the_rule_axis() {
        let scorer = PriorityScorer::new(FieldAccessorRegistry::new());
        let mut candidate = entitlement("E1");
        candidate.account_id = Some("ACC-1".to_string());

        let scored = scorer.score(
            vec![candidate],
            &[field("0A", "AccountId", Some("ACC-1"))],
        );

        assert_eq!(scored[0].customer_score, 1);
        assert_eq!(scored[0].priority_rank, 3); // customer hit only
    }

    #[test]
    fn absent_entitlement_field_matches_as_wildcard() {
        let scorer = PriorityScorer::new(FieldAccessorRegistry::new());

        let scored = scorer.score(
            vec![entitlement("E1")],
            &[field("2A", "ServiceType", Some("Delivery"))],
        );

        assert_eq!(scored[0].service_score, 1);
        assert_eq!(scored[0].priority_rank, 5); // service hit only
    }

    #[test]
    fn absent_request_value_never_matches() {
        let scorer = PriorityScorer::new(FieldAccessorRegistry::new());

        let scored = scorer.score(vec![entitlement("E1")], &[field("2A", "ServiceType", None)]);

        assert_eq!(scored[0].service_score, 0);
        assert_eq!(scored[0].priority_rank, 7);
    }

    #[test]
    fn zero_matches_is_a_valid_rank_seven_candidate() {
        let scorer = PriorityScorer::new(FieldAccessorRegistry::new());
        let mut mismatched = entitlement("E1");
        mismatched.service_type = Some("Removal".to_string());

        let scored = scorer.score(
            vec![mismatched],
            &[field("2A", "ServiceType", Some("Delivery"))],
        );

        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].priority_rank, 7);
        assert_eq!(scored[0].service_score, 0);
    }

    #[test]
    fn superset_of_axis_hits_never_ranks_worse() {
        // Rank monotonicity: strict superset of hit axes → rank no higher.
        for c in [false, true] {
            for s in [false, true] {
                for t in [false, true] {
                    let base = PriorityScorer::rank(c, s, t);
                    for (c2, s2, t2) in [(true, s, t), (c, true, t), (c, s, true)] {
                        assert!(PriorityScorer::rank(c2, s2, t2) <= base);
                    }
                }
            }
        }
    }
}

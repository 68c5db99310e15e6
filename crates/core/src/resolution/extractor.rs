//! Candidate extraction: mapping rules applied to inbound requests.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use dueline_domain::{FieldMappingRule, MatchableField};
use tracing::warn;

use super::accessor::{FieldAccessorRegistry, ResolvedRequest};

/// Everything the extraction pass accumulates across a batch.
#[derive(Debug, Default)]
pub struct ExtractionOutcome {
    /// One matchable field per (request, rule) pair.
    pub fields: Vec<MatchableField>,
    /// Distinct customer-account ids referenced by the batch.
    pub account_ids: BTreeSet<String>,
    /// Earliest relevant service date across the batch.
    pub min_service_date: Option<NaiveDate>,
}

/// Resolves mapped field values into matchable fields and collects the
/// account-id set and minimum service date used to scope the entitlement
/// fetch. Pure transform: unresolvable paths degrade to absence, never
/// abort the batch.
pub struct CandidateExtractor {
    registry: FieldAccessorRegistry,
}

impl CandidateExtractor {
    pub fn new(registry: FieldAccessorRegistry) -> Self {
        Self { registry }
    }

    pub fn extract(
        &self,
        requests: &[ResolvedRequest],
        rules: &[FieldMappingRule],
    ) -> ExtractionOutcome {
        let mut outcome = ExtractionOutcome::default();

        for record in requests {
            if let Some(account_id) = &record.request.account_id {
                outcome.account_ids.insert(account_id.clone());
            }

            let created = record.request.created_at.date_naive();
            outcome.min_service_date = Some(match outcome.min_service_date {
                Some(current) => current.min(created),
                None => created,
            });

            for rule in rules {
                if rule.axis().is_none() {
                    warn!(
                        priority_code = %rule.priority_code,
                        label = %rule.label,
                        "mapping rule has an unknown priority tier; skipping"
                    );
                    continue;
                }

                let value = match self.registry.request_value(&rule.source_path, record) {
                    Some(value) => value,
                    None => {
                        warn!(
                            request_id = %record.request.id,
                            source_path = %rule.source_path,
                            "unresolvable mapping path; treating field as absent"
                        );
                        None
                    }
                };

                outcome.fields.push(MatchableField {
                    request_id: record.request.id.clone(),
                    priority_code: rule.priority_code.clone(),
                    target_field: rule.target_field.clone(),
                    value,
                });
            }
        }

        outcome
    }
}

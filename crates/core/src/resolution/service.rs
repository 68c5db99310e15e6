//! Batch entitlement resolution service.
//!
//! Runs the full pipeline per batch: hydrate related records, extract
//! matchable fields, fetch scoped candidates, filter, score, select.
//! Stateless between invocations; failures are isolated per request.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use dueline_domain::{ResolutionConfig, Result, ScoredCandidate, ServiceRequest};
use std::sync::Arc;
use tracing::{debug, warn};

use super::accessor::{FieldAccessorRegistry, ResolvedRequest};
use super::extractor::CandidateExtractor;
use super::ports::{EntitlementRepository, FieldMapRepository};
use super::query::EntitlementQueryPlanner;
use super::scorer::PriorityScorer;
use super::selector::{EntitlementSelector, GroupedCandidates};
use super::time_window::TimeWindowFilter;
use crate::scheduling::ports::{AssetRepository, LocationRepository};
use crate::scheduling::timezone;

/// Everything the resolution pass produced for a batch.
#[derive(Debug, Default)]
pub struct ResolutionOutcome {
    /// Best candidate per request id; absent key means no candidate at all.
    pub selections: HashMap<String, ScoredCandidate>,
    /// Requests with their hydrated asset/location snapshots, for reuse by
    /// the scheduling stage.
    pub hydrated: HashMap<String, ResolvedRequest>,
}

pub struct ResolutionService {
    entitlements: Arc<dyn EntitlementRepository>,
    mappings: Arc<dyn FieldMapRepository>,
    assets: Arc<dyn AssetRepository>,
    locations: Arc<dyn LocationRepository>,
    extractor: CandidateExtractor,
    scorer: PriorityScorer,
    config: ResolutionConfig,
}

impl ResolutionService {
    pub fn new(
        entitlements: Arc<dyn EntitlementRepository>,
        mappings: Arc<dyn FieldMapRepository>,
        assets: Arc<dyn AssetRepository>,
        locations: Arc<dyn LocationRepository>,
        config: ResolutionConfig,
    ) -> Self {
        let registry = FieldAccessorRegistry::new();
        Self {
            entitlements,
            mappings,
            assets,
            locations,
            extractor: CandidateExtractor::new(registry.clone()),
            scorer: PriorityScorer::new(registry),
            config,
        }
    }

    /// Resolve the best entitlement per request.
    ///
    /// Batches larger than the configured cap are processed in chunks so a
    /// single call never exceeds the per-run query scope. For a fixed `now`,
    /// fixed candidate set and fixed requests the outcome is deterministic.
    pub fn resolve_batch(
        &self,
        requests: &[ServiceRequest],
        now: DateTime<Utc>,
    ) -> Result<ResolutionOutcome> {
        let mut outcome = ResolutionOutcome::default();
        let chunk_size = self.config.max_batch_size.max(1);

        for chunk in requests.chunks(chunk_size) {
            self.resolve_chunk(chunk, now, &mut outcome)?;
        }

        Ok(outcome)
    }

    fn resolve_chunk(
        &self,
        requests: &[ServiceRequest],
        now: DateTime<Utc>,
        outcome: &mut ResolutionOutcome,
    ) -> Result<()> {
        let rules = self.mappings.fetch_mapping_rules()?;

        let hydrated: Vec<ResolvedRequest> =
            requests.iter().map(|request| self.hydrate(request)).collect();

        let extraction = self.extractor.extract(&hydrated, &rules);
        let query =
            EntitlementQueryPlanner::plan(&extraction.account_ids, extraction.min_service_date, now);
        let candidates = self.entitlements.fetch_entitlements(&query)?;

        debug!(
            requests = requests.len(),
            candidates = candidates.len(),
            accounts = query.account_ids.len(),
            "resolving entitlements for batch chunk"
        );

        for record in hydrated {
            let request_id = record.request.id.clone();

            let local_now = timezone::local_time(now, record.location.as_ref());
            let applicable = TimeWindowFilter::retain_applicable(
                candidates.clone(),
                record.request.account_id.as_deref(),
                local_now,
            );

            let fields: Vec<_> = extraction
                .fields
                .iter()
                .filter(|field| field.request_id == request_id)
                .cloned()
                .collect();

            let scored = self.scorer.score(applicable, &fields);
            if let Some(best) = EntitlementSelector::select_best(scored) {
                debug!(
                    request_id = %request_id,
                    entitlement_id = %best.entitlement.id,
                    rank = best.priority_rank,
                    "entitlement selected"
                );
                outcome.selections.insert(request_id.clone(), best);
            } else {
                debug!(request_id = %request_id, "no entitlement candidate survived filtering");
            }

            outcome.hydrated.insert(request_id, record);
        }

        Ok(())
    }

    /// Full grouped candidate set for one request, for manual-selection UIs.
    pub fn grouped_candidates(
        &self,
        request: &ServiceRequest,
        now: DateTime<Utc>,
    ) -> Result<GroupedCandidates> {
        let rules = self.mappings.fetch_mapping_rules()?;
        let record = self.hydrate(request);

        let extraction = self.extractor.extract(std::slice::from_ref(&record), &rules);
        let query =
            EntitlementQueryPlanner::plan(&extraction.account_ids, extraction.min_service_date, now);
        let candidates = self.entitlements.fetch_entitlements(&query)?;

        let local_now = timezone::local_time(now, record.location.as_ref());
        let applicable = TimeWindowFilter::retain_applicable(
            candidates,
            record.request.account_id.as_deref(),
            local_now,
        );

        Ok(EntitlementSelector::grouped(self.scorer.score(applicable, &extraction.fields)))
    }

    /// Resolve the asset and location a request references. Repository
    /// failures degrade to missing relations rather than aborting the batch.
    fn hydrate(&self, request: &ServiceRequest) -> ResolvedRequest {
        let asset = request.asset_id.as_deref().and_then(|id| {
            self.assets.fetch_asset(id).unwrap_or_else(|err| {
                warn!(request_id = %request.id, asset_id = id, error = %err, "asset lookup failed");
                None
            })
        });

        let location = request.location_id.as_deref().and_then(|id| {
            self.locations.fetch_location(id).unwrap_or_else(|err| {
                warn!(request_id = %request.id, location_id = id, error = %err, "location lookup failed");
                None
            })
        });

        ResolvedRequest { request: request.clone(), asset, location }
    }
}

//! Caller-facing engine: resolution plus service-date calculation.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use dueline_domain::{Entitlement, Result, ServiceDateResult, ServiceRequest};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::resolution::service::ResolutionService;
use crate::scheduling::ServiceDateOrchestrator;

/// Per-batch output handed to the persistence collaborator, which owns
/// writing the chosen entitlement id and dates back onto the records.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub results: HashMap<String, ServiceDateResult>,
    /// Raw selections, for callers that persist the winning entitlement.
    pub selections: HashMap<String, Entitlement>,
}

/// Top-level facade: resolve entitlements for a batch, then compute a
/// service date per request.
pub struct DuelineEngine {
    resolution: ResolutionService,
    orchestrator: ServiceDateOrchestrator,
}

impl DuelineEngine {
    pub fn new(resolution: ResolutionService, orchestrator: ServiceDateOrchestrator) -> Self {
        Self { resolution, orchestrator }
    }

    /// Resolve a batch end to end. Every request gets a result; a total
    /// resolution failure (e.g. the entitlement store being down) degrades
    /// to the error-tagged fallback for the whole batch rather than an
    /// `Err`. The only `Err` is a failing business calendar, a required
    /// dependency with nothing left to fall back to.
    pub async fn resolve_service_dates(
        &self,
        requests: &[ServiceRequest],
        now: DateTime<Utc>,
    ) -> Result<BatchOutcome> {
        let run_id = Uuid::new_v4();
        debug!(%run_id, requests = requests.len(), "starting resolution run");
        self.orchestrator.begin_run();

        let resolution = match self.resolution.resolve_batch(requests, now) {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                warn!(%run_id, error = %err, "batch resolution failed; applying the error fallback to every request");
                Err(err)
            }
        };

        let mut outcome = BatchOutcome::default();
        for request in requests {
            let result = match &resolution {
                Err(err) => self.orchestrator.error_fallback(request, err)?,
                Ok(resolved) => {
                    let selection = resolved.selections.get(&request.id);
                    let hydrated = resolved.hydrated.get(&request.id);

                    if let Some(selected) = selection {
                        outcome
                            .selections
                            .insert(request.id.clone(), selected.entitlement.clone());
                    }

                    self.orchestrator
                        .service_date(
                            request,
                            selection,
                            hydrated.and_then(|record| record.asset.as_ref()),
                            hydrated.and_then(|record| record.location.as_ref()),
                        )
                        .await?
                }
            };

            outcome.results.insert(request.id.clone(), result);
        }

        debug!(%run_id, results = outcome.results.len(), "resolution run complete");
        Ok(outcome)
    }

    /// The underlying resolution service, e.g. for the grouped candidate
    /// view that manual-selection UIs present.
    pub fn resolution(&self) -> &ResolutionService {
        &self.resolution
    }
}

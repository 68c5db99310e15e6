//! Service-date decision procedure.
//!
//! Selects between the deterministic entitlement calculation and the
//! capacity-planner-assisted path, with layered fallback. Every path ends in
//! a usable [`ServiceDateResult`]; the only hard failure is the business
//! calendar itself being unavailable inside the fallback policy.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use dueline_domain::constants::{
    CAPACITY_DATE_DISPLAY_FORMAT, CAPACITY_MANAGED_FAMILY, COMMERCIAL_FAMILY, FALLBACK_SLA_TIME,
};
use dueline_domain::{
    Asset, CalculationMethod, DuelineError, Entitlement, Location, Result, ScoredCandidate,
    ServiceDateResult, ServiceRequest,
};
use tracing::{debug, warn};

use super::business_days;
use super::calculator::SlaDateCalculator;
use super::ports::{BusinessCalendar, CapacityPlanner, ConflictProvider};

pub struct ServiceDateOrchestrator {
    calendar: Arc<dyn BusinessCalendar>,
    planner: Arc<dyn CapacityPlanner>,
    conflicts: Arc<dyn ConflictProvider>,
}

impl ServiceDateOrchestrator {
    pub fn new(
        calendar: Arc<dyn BusinessCalendar>,
        planner: Arc<dyn CapacityPlanner>,
        conflicts: Arc<dyn ConflictProvider>,
    ) -> Self {
        Self { calendar, planner, conflicts }
    }

    /// Re-arm run-scoped planner state. Invoked once per resolution run so
    /// a reused planner (and its failure gate) starts each run fresh.
    pub fn begin_run(&self) {
        self.planner.begin_run();
    }

    /// Fallback result for a request whose resolution failed outright,
    /// tagged as a system fault so downstream consumers can tell it apart
    /// from "no entitlement matched".
    pub fn error_fallback(
        &self,
        request: &ServiceRequest,
        error: &DuelineError,
    ) -> Result<ServiceDateResult> {
        self.fallback(request, CalculationMethod::ErrorFallback, Some(error.to_string()))
    }

    /// Compute the service date for one request.
    ///
    /// Errors inside the decision tree are caught here and converted into
    /// the guaranteed fallback result; only a fallback-path calendar failure
    /// is returned as `Err`.
    pub async fn service_date(
        &self,
        request: &ServiceRequest,
        selection: Option<&ScoredCandidate>,
        asset: Option<&Asset>,
        location: Option<&Location>,
    ) -> Result<ServiceDateResult> {
        let Some(selected) = selection else {
            debug!(request_id = %request.id, "no entitlement selected; applying fallback policy");
            return self.fallback(
                request,
                CalculationMethod::FallbackEntitlement,
                Some("no entitlement selected".to_string()),
            );
        };

        match self.decide(request, &selected.entitlement, asset, location).await {
            Ok(result) => Ok(result),
            Err(err) => {
                warn!(request_id = %request.id, error = %err, "service-date calculation failed; applying fallback policy");
                self.fallback(request, CalculationMethod::ErrorFallback, Some(err.to_string()))
            }
        }
    }

    async fn decide(
        &self,
        request: &ServiceRequest,
        entitlement: &Entitlement,
        asset: Option<&Asset>,
        location: Option<&Location>,
    ) -> Result<ServiceDateResult> {
        let family = asset.and_then(|a| a.product_family.as_deref());

        if entitlement.gold_standard || entitlement.contractual || family == Some(COMMERCIAL_FAMILY)
        {
            return self.entitlement_path(
                request,
                entitlement,
                location,
                CalculationMethod::Entitlement,
                None,
            );
        }

        if family == Some(CAPACITY_MANAGED_FAMILY) {
            if let Some(asset) = asset.filter(|a| a.capacity_vendor) {
                return self.capacity_path(request, entitlement, asset, location).await;
            }
        }

        self.entitlement_path(
            request,
            entitlement,
            location,
            CalculationMethod::DefaultEntitlement,
            None,
        )
    }

    /// Deterministic calculation: raw guarantee arithmetic plus business-day
    /// adjustment (unless the entitlement overrides business hours).
    fn entitlement_path(
        &self,
        request: &ServiceRequest,
        entitlement: &Entitlement,
        location: Option<&Location>,
        method: CalculationMethod,
        error_note: Option<String>,
    ) -> Result<ServiceDateResult> {
        let calc = SlaDateCalculator::calculate(entitlement, request.created_at, location);
        let service_date = business_days::adjust_unless_overridden(
            calc.raw_date,
            entitlement.override_business_hours,
            self.calendar.as_ref(),
        )?;

        // Keep the raw time-of-day; shift the timestamp with the date.
        let shifted_days = (service_date - calc.raw_date).num_days();
        let sla_timestamp = calc.raw_timestamp + Duration::days(shifted_days);

        debug!(
            request_id = %request.id,
            entitlement_id = %entitlement.id,
            %service_date,
            method = %method,
            "service date calculated from entitlement"
        );

        Ok(ServiceDateResult {
            service_date,
            sla_timestamp,
            calculation_method: method,
            available_dates_considered: None,
            error_note,
        })
    }

    /// Capacity-planner-assisted calculation with conflict resolution.
    ///
    /// The planner is invoked at most once per request; an empty result or
    /// client error falls through to the entitlement calculation with the
    /// matching fallback tag.
    async fn capacity_path(
        &self,
        request: &ServiceRequest,
        entitlement: &Entitlement,
        asset: &Asset,
        location: Option<&Location>,
    ) -> Result<ServiceDateResult> {
        let Some(site_id) = asset.capacity_site_id.as_deref() else {
            debug!(request_id = %request.id, asset_id = %asset.id, "no capacity site id resolvable");
            return self.entitlement_path(
                request,
                entitlement,
                location,
                CalculationMethod::FallbackNoSbid,
                None,
            );
        };

        let anchor = SlaDateCalculator::calculate(entitlement, request.created_at, location);

        let available = match self.planner.available_dates(site_id, anchor.raw_date).await {
            Ok(dates) => dates,
            Err(err) => {
                warn!(request_id = %request.id, site_id, error = %err, "capacity planner call failed");
                return self.entitlement_path(
                    request,
                    entitlement,
                    location,
                    CalculationMethod::FallbackEntitlement,
                    Some(err.to_string()),
                );
            }
        };

        if available.is_empty() {
            return self.entitlement_path(
                request,
                entitlement,
                location,
                CalculationMethod::FallbackNoDates,
                None,
            );
        }

        let scheduled = self.conflicts.scheduled_dates(&asset.id)?;

        let mut sorted = available.clone();
        sorted.sort_unstable();
        let service_date = match sorted.iter().copied().find(|date| !scheduled.contains(date)) {
            Some(date) => date,
            None => {
                // Everything the planner offered is already booked: take the
                // day after the latest offered date, calendar-adjusted.
                let latest = *sorted.last().ok_or_else(|| {
                    DuelineError::Internal("capacity date list emptied during sort".into())
                })?;
                let next = latest.succ_opt().ok_or_else(|| {
                    DuelineError::Calculation("date overflow past latest capacity date".into())
                })?;
                business_days::adjust_forward(next, self.calendar.as_ref())?
            }
        };

        let considered = sorted
            .iter()
            .map(|date| date.format(CAPACITY_DATE_DISPLAY_FORMAT).to_string())
            .collect();

        debug!(
            request_id = %request.id,
            site_id,
            %service_date,
            "service date taken from capacity planner"
        );

        Ok(ServiceDateResult {
            service_date,
            sla_timestamp: end_of_day(service_date)?,
            calculation_method: CalculationMethod::CapacityPlanner,
            available_dates_considered: Some(considered),
            error_note: None,
        })
    }

    /// Guaranteed-success path: tomorrow's date, business-day-adjusted
    /// unconditionally (the override flag is ignored), at end of day.
    fn fallback(
        &self,
        request: &ServiceRequest,
        method: CalculationMethod,
        error_note: Option<String>,
    ) -> Result<ServiceDateResult> {
        let tomorrow = (request.created_at + Duration::days(1)).date_naive();
        let service_date = business_days::adjust_forward(tomorrow, self.calendar.as_ref())?;

        Ok(ServiceDateResult {
            service_date,
            sla_timestamp: end_of_day(service_date)?,
            calculation_method: method,
            available_dates_considered: None,
            error_note,
        })
    }
}

fn end_of_day(date: NaiveDate) -> Result<chrono::DateTime<Utc>> {
    let (hour, minute, second) = FALLBACK_SLA_TIME;
    let naive = date
        .and_hms_opt(hour, minute, second)
        .ok_or_else(|| DuelineError::Calculation(format!("invalid end-of-day time for {date}")))?;
    Ok(Utc.from_utc_datetime(&naive))
}

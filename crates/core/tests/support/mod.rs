//! Shared test helpers for `dueline-core` integration tests.
//!
//! Reusable fixtures and lightweight in-memory port implementations so the
//! pipeline tests can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use dueline_core::resolution::ports::{EntitlementRepository, FieldMapRepository};
use dueline_core::scheduling::ports::{
    AssetRepository, BusinessCalendar, CapacityPlanner, ConflictProvider, LocationRepository,
};
use dueline_domain::{
    Asset, DuelineError, Entitlement, EntitlementQuery, FieldMappingRule, GuaranteeUnit, Location,
    Result, ServiceRequest,
};

/// Entitlement pool honouring the repository contract: only approved
/// entitlements whose validity window covers the query's date and whose
/// account is in scope (or wildcard) come back.
pub struct InMemoryEntitlements {
    pub pool: Vec<Entitlement>,
}

impl EntitlementRepository for InMemoryEntitlements {
    fn fetch_entitlements(&self, query: &EntitlementQuery) -> Result<Vec<Entitlement>> {
        Ok(self
            .pool
            .iter()
            .filter(|e| {
                e.approved
                    && e.valid_from <= query.not_before
                    && e.valid_to >= query.not_before
                    && e.account_id
                        .as_ref()
                        .map_or(true, |account| query.account_ids.contains(account))
            })
            .cloned()
            .collect())
    }
}

pub struct InMemoryMappings {
    pub rules: Vec<FieldMappingRule>,
}

impl InMemoryMappings {
    /// The standard rule set used across tests: one customer rule, two
    /// service rules, one transaction rule.
    pub fn standard() -> Self {
        Self {
            rules: vec![
                mapping_rule("0A", "Account", "AccountId", "AccountId"),
                mapping_rule("2A", "Service Type", "ServiceType", "ServiceType"),
                mapping_rule("2B", "Service Reason", "ServiceReason", "ServiceReason"),
                mapping_rule("3A", "Product Family", "Asset.ProductFamily", "ProductFamily"),
            ],
        }
    }
}

impl FieldMapRepository for InMemoryMappings {
    fn fetch_mapping_rules(&self) -> Result<Vec<FieldMappingRule>> {
        Ok(self.rules.clone())
    }
}

#[derive(Default)]
pub struct InMemoryAssets {
    pub assets: HashMap<String, Asset>,
}

impl AssetRepository for InMemoryAssets {
    fn fetch_asset(&self, id: &str) -> Result<Option<Asset>> {
        Ok(self.assets.get(id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryLocations {
    pub locations: HashMap<String, Location>,
}

impl LocationRepository for InMemoryLocations {
    fn fetch_location(&self, id: &str) -> Result<Option<Location>> {
        Ok(self.locations.get(id).cloned())
    }
}

/// Weekends closed plus configurable holidays.
#[derive(Default)]
pub struct WeekendCalendar {
    pub holidays: Vec<NaiveDate>,
}

impl BusinessCalendar for WeekendCalendar {
    fn is_business_day(&self, date: NaiveDate) -> Result<bool> {
        let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        Ok(!weekend && !self.holidays.contains(&date))
    }
}

/// Capacity planner returning a fixed outcome.
pub struct StaticPlanner {
    pub outcome: std::result::Result<Vec<NaiveDate>, String>,
}

impl StaticPlanner {
    pub fn empty() -> Self {
        Self { outcome: Ok(vec![]) }
    }

    pub fn offering(dates: Vec<NaiveDate>) -> Self {
        Self { outcome: Ok(dates) }
    }

    pub fn failing(message: &str) -> Self {
        Self { outcome: Err(message.to_string()) }
    }
}

#[async_trait]
impl CapacityPlanner for StaticPlanner {
    async fn available_dates(
        &self,
        _site_id: &str,
        _service_date: NaiveDate,
    ) -> Result<Vec<NaiveDate>> {
        match &self.outcome {
            Ok(dates) => Ok(dates.clone()),
            Err(message) => Err(DuelineError::Network(message.clone())),
        }
    }
}

#[derive(Default)]
pub struct StaticConflicts {
    pub booked: BTreeSet<NaiveDate>,
}

impl ConflictProvider for StaticConflicts {
    fn scheduled_dates(&self, _asset_id: &str) -> Result<BTreeSet<NaiveDate>> {
        Ok(self.booked.clone())
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn mapping_rule(code: &str, label: &str, source: &str, target: &str) -> FieldMappingRule {
    FieldMappingRule {
        priority_code: code.to_string(),
        label: label.to_string(),
        source_path: source.to_string(),
        target_field: target.to_string(),
    }
}

pub fn request(id: &str, account: Option<&str>, created_at: DateTime<Utc>) -> ServiceRequest {
    ServiceRequest {
        id: id.to_string(),
        account_id: account.map(str::to_string),
        location_id: None,
        service_type: Some("Delivery".to_string()),
        service_sub_type: None,
        service_reason: Some("New Service".to_string()),
        asset_id: None,
        created_at,
    }
}

/// A valid, approved, wildcard two-day entitlement; tweak fields per test.
pub fn entitlement(id: &str) -> Entitlement {
    Entitlement {
        id: id.to_string(),
        account_id: None,
        valid_from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        valid_to: NaiveDate::from_ymd_opt(2030, 12, 31).unwrap(),
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

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

//! Entitlement candidate types.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Unit of an entitlement's service guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuaranteeUnit {
    Days,
    Hours,
}

/// Direction of an entitlement's daily cutoff window.
///
/// `Before` means the entitlement only applies before the cutoff hour;
/// `After` means it only applies from the cutoff hour onwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CutoffDirection {
    Before,
    After,
}

/// A candidate SLA contract.
///
/// Entitlements are created and approved by an external configuration
/// process; the engine treats them as read-only. An `account_id` of `None`
/// marks an industry-standard (wildcard) entitlement applicable to any
/// customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entitlement {
    pub id: String,
    pub account_id: Option<String>,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
    pub approved: bool,

    pub guarantee_unit: GuaranteeUnit,
    pub guarantee_value: f64,

    pub cutoff_hour: Option<u32>,
    pub cutoff_direction: Option<CutoffDirection>,
    /// Weekdays on which the entitlement applies; empty means every day.
    pub weekdays: Vec<Weekday>,
    /// When true, the computed date may land on a non-business day.
    pub override_business_hours: bool,

    pub gold_standard: bool,
    pub contractual: bool,

    // Matchable fields addressed by mapping-rule target paths.
    pub service_type: Option<String>,
    pub service_sub_type: Option<String>,
    pub service_reason: Option<String>,
    pub product_family: Option<String>,
}

impl Entitlement {
    /// Whether the entitlement is an industry-standard (wildcard) default.
    pub fn is_industry_standard(&self) -> bool {
        self.account_id.is_none()
    }
}

/// Filter handed to the entitlement repository: only entitlements that are
/// approved, scoped to one of the collected accounts (or wildcard), and
/// still valid on `not_before` should be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementQuery {
    /// Distinct account ids referenced by the batch, sorted for determinism.
    pub account_ids: Vec<String>,
    /// Minimum service date across the batch; entitlements expiring earlier
    /// are out of scope.
    pub not_before: NaiveDate,
}

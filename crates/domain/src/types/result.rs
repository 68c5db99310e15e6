//! Resolution output types.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::entitlement::Entitlement;

/// How a service date was produced, for downstream confidence flagging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalculationMethod {
    /// Deterministic entitlement calculation (gold-standard, contractual or
    /// commercial assets).
    Entitlement,
    /// Date taken from the external capacity planner.
    CapacityPlanner,
    /// Deterministic calculation for assets outside both special paths.
    DefaultEntitlement,
    /// Capacity path errored; fell back to the entitlement calculation.
    FallbackEntitlement,
    /// Capacity planner returned no available dates.
    FallbackNoDates,
    /// No capacity site id could be resolved for the asset.
    FallbackNoSbid,
    /// Unexpected failure; the guaranteed fallback policy was applied.
    ErrorFallback,
}

impl fmt::Display for CalculationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entitlement => write!(f, "Entitlement"),
            Self::CapacityPlanner => write!(f, "Capacity Planner"),
            Self::DefaultEntitlement => write!(f, "Default - Entitlement"),
            Self::FallbackEntitlement => write!(f, "Fallback - Entitlement"),
            Self::FallbackNoDates => write!(f, "Fallback - No Dates"),
            Self::FallbackNoSbid => write!(f, "Fallback - No SBID"),
            Self::ErrorFallback => write!(f, "Error - Fallback"),
        }
    }
}

impl CalculationMethod {
    /// True for any of the low-confidence fallback paths.
    pub fn is_fallback(&self) -> bool {
        matches!(
            self,
            Self::FallbackEntitlement
                | Self::FallbackNoDates
                | Self::FallbackNoSbid
                | Self::ErrorFallback
        )
    }
}

/// An entitlement scored against one request.
///
/// `priority_rank` is in [0, 7] and is strictly a function of which axes had
/// at least one match; lower is more specific.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub entitlement: Entitlement,
    pub customer_score: u32,
    pub service_score: u32,
    pub transaction_score: u32,
    pub priority_rank: u8,
}

/// The computed outcome for one request. Always produced, even on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDateResult {
    pub service_date: NaiveDate,
    pub sla_timestamp: DateTime<Utc>,
    pub calculation_method: CalculationMethod,
    /// Planner dates that were considered, normalized to MM/DD/YYYY.
    pub available_dates_considered: Option<Vec<String>>,
    pub error_note: Option<String>,
}

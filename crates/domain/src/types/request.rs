//! Inbound record types: service requests and the related records they
//! reference.
//!
//! These are read-only snapshots produced by request intake; the engine never
//! mutates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An inbound service request (case or quote) awaiting SLA resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: String,
    pub account_id: Option<String>,
    pub location_id: Option<String>,
    pub service_type: Option<String>,
    pub service_sub_type: Option<String>,
    pub service_reason: Option<String>,
    pub asset_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Asset referenced by a service request.
///
/// The product family drives the orchestrator's decision tree; the capacity
/// fields gate the external planner path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub product_family: Option<String>,
    /// Whether the asset is serviced by the designated external capacity vendor.
    pub capacity_vendor: bool,
    /// Site identifier (SBID) used by the capacity planner, when known.
    pub capacity_site_id: Option<String>,
}

/// Service location, carrying whatever timezone information is configured.
///
/// A named timezone id is preferred; the static UTC offset is a legacy
/// fallback that drifts across DST boundaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub timezone_id: Option<String>,
    pub utc_offset_hours: Option<i32>,
}

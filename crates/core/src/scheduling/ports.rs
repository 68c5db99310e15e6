//! Port interfaces for the scheduling side of the engine.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::NaiveDate;
use dueline_domain::{Asset, Location, Result};

/// Business-calendar oracle. A required dependency: if this fails inside the
/// fallback path there is nothing left to fall back to, and the error is
/// surfaced to the caller.
pub trait BusinessCalendar: Send + Sync {
    fn is_business_day(&self, date: NaiveDate) -> Result<bool>;
}

/// Supplies location records (timezone context).
pub trait LocationRepository: Send + Sync {
    fn fetch_location(&self, id: &str) -> Result<Option<Location>>;
}

/// Supplies asset records (product family, capacity linkage).
pub trait AssetRepository: Send + Sync {
    fn fetch_asset(&self, id: &str) -> Result<Option<Asset>>;
}

/// External capacity-planning lookup.
///
/// Implementations own the timeout and must convert transport failures into
/// an empty list; an error from this trait is reserved for conditions the
/// orchestrator should treat as a client-side fault (still non-fatal).
#[async_trait]
pub trait CapacityPlanner: Send + Sync {
    /// Called once at the start of every resolution run. Implementations
    /// carrying run-scoped state (failure gates, short-lived caches) reset
    /// it here; the default is a no-op.
    fn begin_run(&self) {}

    async fn available_dates(
        &self,
        site_id: &str,
        service_date: NaiveDate,
    ) -> Result<Vec<NaiveDate>>;
}

/// Supplies the dates already committed for an asset, to avoid
/// double-booking on the capacity path.
pub trait ConflictProvider: Send + Sync {
    fn scheduled_dates(&self, asset_id: &str) -> Result<BTreeSet<NaiveDate>>;
}

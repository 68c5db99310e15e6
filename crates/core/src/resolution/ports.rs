//! Data-access port interfaces for the resolution pipeline.
//!
//! The engine performs no storage I/O itself; fetching candidates and
//! mapping configuration is delegated to these traits.

use dueline_domain::{Entitlement, EntitlementQuery, FieldMappingRule, Result};

/// Supplies entitlement candidates scoped by an [`EntitlementQuery`].
///
/// Implementations must only return entitlements that are approved and
/// whose validity window covers the query's `not_before` date.
pub trait EntitlementRepository: Send + Sync {
    fn fetch_entitlements(&self, query: &EntitlementQuery) -> Result<Vec<Entitlement>>;
}

/// Supplies the ordered field-mapping rule set that drives matching.
pub trait FieldMapRepository: Send + Sync {
    fn fetch_mapping_rules(&self) -> Result<Vec<FieldMappingRule>>;
}

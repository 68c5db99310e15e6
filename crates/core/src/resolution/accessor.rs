//! Typed field accessors for dot-path lookups.
//!
//! The source system resolved mapping-rule paths with runtime reflection.
//! Here each known path maps to a typed accessor closure, resolved once when
//! the registry is built, so the rule set stays configurable without giving
//! up static typing.

use std::collections::HashMap;

use dueline_domain::constants::MAX_RELATIONSHIP_DEPTH;
use dueline_domain::{Asset, Entitlement, Location, ServiceRequest};

/// A request together with the related records its mapping paths can reach.
#[derive(Debug, Clone)]
pub struct ResolvedRequest {
    pub request: ServiceRequest,
    pub asset: Option<Asset>,
    pub location: Option<Location>,
}

impl ResolvedRequest {
    /// A request with no related records hydrated.
    pub fn bare(request: ServiceRequest) -> Self {
        Self { request, asset: None, location: None }
    }
}

type RequestAccessor = fn(&ResolvedRequest) -> Option<String>;
type EntitlementAccessor = fn(&Entitlement) -> Option<String>;

/// Registry mapping dot-notation paths to typed extraction closures.
///
/// Request paths may traverse relationships (`Asset.ProductFamily`);
/// entitlement target fields are always flat.
#[derive(Clone)]
pub struct FieldAccessorRegistry {
    request: HashMap<&'static str, RequestAccessor>,
    entitlement: HashMap<&'static str, EntitlementAccessor>,
}

impl FieldAccessorRegistry {
    pub fn new() -> Self {
        let mut request: HashMap<&'static str, RequestAccessor> = HashMap::new();
        request.insert("AccountId", |r| r.request.account_id.clone());
        request.insert("LocationId", |r| r.request.location_id.clone());
        request.insert("ServiceType", |r| r.request.service_type.clone());
        request.insert("ServiceSubType", |r| r.request.service_sub_type.clone());
        request.insert("ServiceReason", |r| r.request.service_reason.clone());
        request.insert("AssetId", |r| r.request.asset_id.clone());
        request.insert("Asset.ProductFamily", |r| {
            r.asset.as_ref().and_then(|a| a.product_family.clone())
        });
        request.insert("Asset.CapacitySiteId", |r| {
            r.asset.as_ref().and_then(|a| a.capacity_site_id.clone())
        });
        request.insert("Location.TimezoneId", |r| {
            r.location.as_ref().and_then(|l| l.timezone_id.clone())
        });

        let mut entitlement: HashMap<&'static str, EntitlementAccessor> = HashMap::new();
        entitlement.insert("AccountId", |e| e.account_id.clone());
        entitlement.insert("ServiceType", |e| e.service_type.clone());
        entitlement.insert("ServiceSubType", |e| e.service_sub_type.clone());
        entitlement.insert("ServiceReason", |e| e.service_reason.clone());
        entitlement.insert("ProductFamily", |e| e.product_family.clone());

        Self { request, entitlement }
    }

    /// Resolve a request-side source path. `None` marks an unresolvable or
    /// over-deep path; callers log and treat the field as absent.
    pub fn request_value(&self, path: &str, record: &ResolvedRequest) -> Option<Option<String>> {
        if path.split('.').count() > MAX_RELATIONSHIP_DEPTH + 1 {
            return None;
        }
        self.request.get(path).map(|accessor| accessor(record))
    }

    /// Resolve an entitlement-side target field.
    pub fn entitlement_value(&self, field: &str, entitlement: &Entitlement) -> Option<Option<String>> {
        self.entitlement.get(field).map(|accessor| accessor(entitlement))
    }

    /// Whether a target field is known to the registry.
    pub fn knows_target(&self, field: &str) -> bool {
        self.entitlement.contains_key(field)
    }
}

impl Default for FieldAccessorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

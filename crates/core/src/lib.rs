//! # Dueline Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The entitlement-resolution pipeline (extract, filter, score, select)
//! - The SLA date-calculation engine and service-date orchestrator
//! - Port/adapter interfaces (traits)
//!
//! ## Architecture Principles
//! - Only depends on `dueline-domain`
//! - No database or HTTP code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod engine;
pub mod resolution;
pub mod scheduling;

// Re-export specific items to avoid ambiguity
pub use engine::{BatchOutcome, DuelineEngine};
pub use resolution::ports::{EntitlementRepository, FieldMapRepository};
pub use resolution::{
    CandidateExtractor, EntitlementQueryPlanner, EntitlementSelector, FieldAccessorRegistry,
    GroupedCandidates, PriorityScorer, ResolutionService, ResolvedRequest, TimeWindowFilter,
};
pub use scheduling::ports::{
    AssetRepository, BusinessCalendar, CapacityPlanner, ConflictProvider, LocationRepository,
};
pub use scheduling::ServiceDateOrchestrator;

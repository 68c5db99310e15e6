//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! engine.

// SLA calculation
pub const DEFAULT_CUTOFF_HOUR: u32 = 14; // 2 PM local, applied when an entitlement carries no explicit cutoff
pub const FALLBACK_SLA_TIME: (u32, u32, u32) = (23, 59, 59); // end-of-day timestamp for fallback results

// Field mapping
pub const MAX_RELATIONSHIP_DEPTH: usize = 3;

// Batch processing
pub const DEFAULT_MAX_BATCH_SIZE: usize = 200;

// Product families with special scheduling behaviour
pub const COMMERCIAL_FAMILY: &str = "Commercial";
pub const CAPACITY_MANAGED_FAMILY: &str = "Rolloff";

// Capacity planner
pub const CAPACITY_FAILURE_GATE_THRESHOLD: u32 = 3;
pub const CAPACITY_DATE_WIRE_FORMAT: &str = "%Y/%m/%d";
pub const CAPACITY_DATE_DISPLAY_FORMAT: &str = "%m/%d/%Y";

//! Entitlement resolution pipeline: extract, filter, score, select.

pub mod accessor;
pub mod extractor;
pub mod ports;
pub mod query;
pub mod scorer;
pub mod selector;
pub mod service;
pub mod time_window;

pub use accessor::{FieldAccessorRegistry, ResolvedRequest};
pub use extractor::{CandidateExtractor, ExtractionOutcome};
pub use query::EntitlementQueryPlanner;
pub use scorer::PriorityScorer;
pub use selector::{EntitlementSelector, GroupedCandidates};
pub use service::ResolutionService;
pub use time_window::TimeWindowFilter;

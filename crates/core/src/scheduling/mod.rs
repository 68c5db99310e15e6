//! SLA date calculation: calendar arithmetic, timezone conversion and the
//! service-date decision procedure.

pub mod business_days;
pub mod calculator;
pub mod orchestrator;
pub mod ports;
pub mod timezone;

pub use calculator::{SlaCalculation, SlaDateCalculator};
pub use orchestrator::ServiceDateOrchestrator;

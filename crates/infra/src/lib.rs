//! Infrastructure adapters for Dueline.
//!
//! Everything here implements a port defined in `dueline-core`: SQLite
//! repositories behind an r2d2 pool, the capacity-planning HTTP client,
//! and the configuration loader. Assembly of a full engine from a
//! [`dueline_domain::Config`] lives in [`bootstrap`].

pub mod bootstrap;
pub mod config;
pub mod database;
pub mod errors;
pub mod http;
pub mod integrations;

pub use bootstrap::build_engine;
pub use database::DbManager;
pub use errors::InfraError;
pub use http::HttpClient;
pub use integrations::capacity::CapacityPlanningClient;

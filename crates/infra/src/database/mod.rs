//! SQLite-backed implementations of the data-access ports.

pub mod asset_repository;
pub mod calendar;
pub mod conflicts;
pub mod entitlement_repository;
pub mod field_map_repository;
pub mod location_repository;
pub mod manager;

pub use asset_repository::SqliteAssetRepository;
pub use calendar::SqliteBusinessCalendar;
pub use conflicts::SqliteConflictProvider;
pub use entitlement_repository::SqliteEntitlementRepository;
pub use field_map_repository::SqliteFieldMapRepository;
pub use location_repository::SqliteLocationRepository;
pub use manager::DbManager;

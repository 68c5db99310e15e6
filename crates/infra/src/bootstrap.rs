//! Wiring of the SQLite adapters and the capacity client into an engine.

use std::sync::Arc;

use dueline_core::{DuelineEngine, ResolutionService, ServiceDateOrchestrator};
use dueline_domain::{Config, Result};
use tracing::info;

use crate::database::{
    DbManager, SqliteAssetRepository, SqliteBusinessCalendar, SqliteConflictProvider,
    SqliteEntitlementRepository, SqliteFieldMapRepository, SqliteLocationRepository,
};
use crate::integrations::capacity::CapacityPlanningClient;

/// Assemble a fully wired [`DuelineEngine`] from configuration.
///
/// Opens the database (running migrations), and binds every port to its
/// SQLite adapter plus the capacity HTTP client.
pub fn build_engine(config: &Config) -> Result<DuelineEngine> {
    let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
    db.run_migrations()?;

    let resolution = ResolutionService::new(
        Arc::new(SqliteEntitlementRepository::new(db.clone())),
        Arc::new(SqliteFieldMapRepository::new(db.clone())),
        Arc::new(SqliteAssetRepository::new(db.clone())),
        Arc::new(SqliteLocationRepository::new(db.clone())),
        config.resolution.clone(),
    );

    let orchestrator = ServiceDateOrchestrator::new(
        Arc::new(SqliteBusinessCalendar::new(db.clone())),
        Arc::new(CapacityPlanningClient::new(&config.capacity)?),
        Arc::new(SqliteConflictProvider::new(db)),
    );

    info!(db_path = %config.database.path, "engine assembled");
    Ok(DuelineEngine::new(resolution, orchestrator))
}

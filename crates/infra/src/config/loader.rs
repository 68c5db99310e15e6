//! Configuration loader.
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the required variables are absent, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `DUELINE_DB_PATH`: Database file path (required for the env source)
//! - `DUELINE_DB_POOL_SIZE`: Connection pool size
//! - `DUELINE_MAX_BATCH_SIZE`: Soft cap on requests resolved per run
//! - `DUELINE_CAPACITY_BASE_URL`: Capacity planner base URL (required for
//!   the env source)
//! - `DUELINE_CAPACITY_BEARER_TOKEN`: Bearer token for the capacity planner
//! - `DUELINE_CAPACITY_PARTNER_KEY`: Partner key header value
//! - `DUELINE_CAPACITY_TIMEOUT_SECONDS`: Capacity call timeout
//! - `DUELINE_CAPACITY_FAILURE_GATE`: Consecutive failures before the
//!   client stops calling out for the rest of the run
//!
//! ## File Locations
//! The loader probes `config.{json,toml}` and `dueline.{json,toml}` in the
//! working directory, up to two parent directories, and next to the
//! executable.

use std::path::{Path, PathBuf};

use dueline_domain::{Config, DuelineError, Result};

/// Load configuration with automatic fallback strategy.
///
/// A `.env` file in the working directory is applied first, then the
/// environment source is tried, then the config-file probe.
///
/// # Errors
/// Returns `DuelineError::Config` if neither source yields a complete
/// configuration.
pub fn load() -> Result<Config> {
    dotenvy::dotenv().ok();

    match load_from_env() {
        Ok(config) => {
            tracing::info!("configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "environment source incomplete, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables.
///
/// `DUELINE_DB_PATH` and `DUELINE_CAPACITY_BASE_URL` must be present;
/// everything else falls back to the defaults in [`Config`].
///
/// # Errors
/// Returns `DuelineError::Config` if a required variable is missing or a
/// numeric variable fails to parse.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();

    config.database.path = env_var("DUELINE_DB_PATH")?;
    config.capacity.base_url = env_var("DUELINE_CAPACITY_BASE_URL")?;

    if let Some(pool_size) = env_parse::<u32>("DUELINE_DB_POOL_SIZE")? {
        config.database.pool_size = pool_size;
    }
    if let Some(batch_size) = env_parse::<usize>("DUELINE_MAX_BATCH_SIZE")? {
        config.resolution.max_batch_size = batch_size;
    }
    if let Some(timeout) = env_parse::<u64>("DUELINE_CAPACITY_TIMEOUT_SECONDS")? {
        config.capacity.timeout_seconds = timeout;
    }
    if let Some(threshold) = env_parse::<u32>("DUELINE_CAPACITY_FAILURE_GATE")? {
        config.capacity.failure_gate_threshold = threshold;
    }
    config.capacity.bearer_token = std::env::var("DUELINE_CAPACITY_BEARER_TOKEN").ok();
    config.capacity.partner_key = std::env::var("DUELINE_CAPACITY_PARTNER_KEY").ok();

    Ok(config)
}

/// Load configuration from a file.
///
/// If `path` is `None`, probes the standard locations. Format is detected
/// by extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `DuelineError::Config` if no file is found or parsing fails.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(DuelineError::Config(format!(
                    "config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            DuelineError::Config("no config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| DuelineError::Config(format!("failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| DuelineError::Config(format!("invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| DuelineError::Config(format!("invalid JSON format: {e}"))),
        _ => Err(DuelineError::Config(format!("unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a configuration file, returning the
/// first that exists.
fn probe_config_paths() -> Option<PathBuf> {
    let names = ["config.json", "config.toml", "dueline.json", "dueline.toml"];
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        for prefix in ["", "../", "../../"] {
            for name in names {
                candidates.push(cwd.join(format!("{prefix}{name}")));
            }
        }
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            for name in names {
                candidates.push(exe_dir.join(name));
            }
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| DuelineError::Config(format!("missing environment variable: {name}")))
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| DuelineError::Config(format!("invalid value for {name}: {e}"))),
        Err(_) => Ok(None),
    }
}

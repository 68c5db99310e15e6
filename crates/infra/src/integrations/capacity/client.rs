//! HTTP client for the external capacity-planning API.
//!
//! The availability lookup is advisory: any transport failure, non-success
//! status or malformed body degrades to an empty date list so the caller
//! can fall back to the deterministic calculation. A consecutive-failure
//! gate stops calling out for the rest of the run once the vendor looks
//! down.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use dueline_core::CapacityPlanner;
use dueline_domain::constants::CAPACITY_DATE_WIRE_FORMAT;
use dueline_domain::{CapacityPlannerConfig, DuelineError, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::http::HttpClient;

const PARTNER_KEY_HEADER: &str = "x-partner-key";
const QUERY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Client for the vendor capacity API, implementing the async
/// [`CapacityPlanner`] port.
pub struct CapacityPlanningClient {
    http: HttpClient,
    base_url: String,
    failure_threshold: u32,
    consecutive_failures: AtomicU32,
}

/// One service line in the capacity response.
#[derive(Debug, Deserialize)]
struct ServiceLineCapacity {
    #[serde(rename = "AvailableDates", default)]
    available_dates: Vec<String>,
}

impl CapacityPlanningClient {
    /// Build a client from configuration. Auth headers are attached to
    /// every request.
    pub fn new(config: &CapacityPlannerConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.bearer_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|err| DuelineError::Config(format!("invalid bearer token: {err}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        if let Some(key) = &config.partner_key {
            let mut value = HeaderValue::from_str(key)
                .map_err(|err| DuelineError::Config(format!("invalid partner key: {err}")))?;
            value.set_sensitive(true);
            headers.insert(PARTNER_KEY_HEADER, value);
        }

        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .max_attempts(2)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            failure_threshold: config.failure_gate_threshold.max(1),
            consecutive_failures: AtomicU32::new(0),
        })
    }

    /// Reset the consecutive-failure gate, e.g. at the start of a new
    /// resolution run when the client instance is reused.
    pub fn reset_failure_gate(&self) {
        self.consecutive_failures.store(0, Ordering::Relaxed);
    }

    fn gate_open(&self) -> bool {
        self.consecutive_failures.load(Ordering::Relaxed) >= self.failure_threshold
    }

    fn record_failure(&self) {
        let failures = self.consecutive_failures.fetch_add(1, Ordering::Relaxed) + 1;
        if failures == self.failure_threshold {
            warn!(failures, "capacity planner failure gate opened; skipping further calls");
        }
    }

    fn record_success(&self) {
        self.consecutive_failures.store(0, Ordering::Relaxed);
    }

    fn parse_dates(&self, site_id: &str, lines: Vec<ServiceLineCapacity>) -> Vec<NaiveDate> {
        let mut dates = BTreeSet::new();
        for line in lines {
            for raw in line.available_dates {
                match NaiveDate::parse_from_str(&raw, CAPACITY_DATE_WIRE_FORMAT) {
                    Ok(date) => {
                        dates.insert(date);
                    }
                    Err(err) => {
                        warn!(site_id, raw, error = %err, "skipping unparseable capacity date");
                    }
                }
            }
        }
        dates.into_iter().collect()
    }
}

#[async_trait]
impl CapacityPlanner for CapacityPlanningClient {
    fn begin_run(&self) {
        self.reset_failure_gate();
    }

    async fn available_dates(
        &self,
        site_id: &str,
        service_date: NaiveDate,
    ) -> Result<Vec<NaiveDate>> {
        if self.gate_open() {
            warn!(site_id, "capacity planner gate open; returning no availability");
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/servicelines/{}/capacity?serviceDate={}",
            self.base_url,
            site_id,
            service_date.format(QUERY_DATE_FORMAT)
        );
        debug!(site_id, %service_date, "querying capacity planner");

        let response = match self.http.get(&url).await {
            Ok(response) => response,
            Err(err) => {
                warn!(site_id, error = %err, "capacity planner call failed");
                self.record_failure();
                return Ok(Vec::new());
            }
        };

        if !response.status().is_success() {
            warn!(site_id, status = %response.status(), "capacity planner returned an error status");
            self.record_failure();
            return Ok(Vec::new());
        }

        let lines: Vec<ServiceLineCapacity> = match response.json().await {
            Ok(lines) => lines,
            Err(err) => {
                warn!(site_id, error = %err, "capacity planner returned a malformed body");
                self.record_failure();
                return Ok(Vec::new());
            }
        };

        self.record_success();
        let dates = self.parse_dates(site_id, lines);
        debug!(site_id, count = dates.len(), "capacity planner returned availability");
        Ok(dates)
    }
}

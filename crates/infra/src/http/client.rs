use std::time::Duration;

use dueline_domain::{DuelineError, Result};
use reqwest::header::HeaderMap;
use reqwest::{Client as ReqwestClient, Response};
use tracing::debug;

use crate::errors::InfraError;

/// Outbound GET support for the vendor integrations.
///
/// The engine's only outbound HTTP traffic is idempotent GET lookups, so
/// the wrapper exposes exactly that: a GET with a bounded number of
/// attempts, doubling the delay between them. Server errors (5xx) and
/// transport failures count as transient; 4xx responses come back to the
/// caller on the first attempt.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    max_attempts: u32,
    base_backoff: Duration,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// GET `url`, retrying transient failures.
    pub async fn get(&self, url: &str) -> Result<Response> {
        let mut attempt = 1u32;
        let mut delay = self.base_backoff;

        loop {
            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    debug!(url, %status, attempt, "GET completed");
                    if !status.is_server_error() || attempt >= self.max_attempts {
                        return Ok(response);
                    }
                }
                Err(err) => {
                    debug!(url, error = %err, attempt, "GET failed");
                    if !is_transient(&err) || attempt >= self.max_attempts {
                        return Err(DuelineError::from(InfraError::from(err)));
                    }
                }
            }

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            delay = delay.saturating_mul(2);
            attempt += 1;
        }
    }
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_attempts: u32,
    base_backoff: Duration,
    headers: HeaderMap,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_attempts: 3,
            base_backoff: Duration::from_millis(200),
            headers: HeaderMap::new(),
        }
    }
}

impl HttpClientBuilder {
    /// Per-request timeout, covering the whole attempt including the body.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total number of attempts (initial try + retries), clamped to ≥ 1.
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    /// Headers sent with every request, e.g. auth headers for one upstream.
    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .default_headers(self.headers)
            .no_proxy()
            .build()
            .map_err(|err| DuelineError::from(InfraError::from(err)))?;

        Ok(HttpClient { client, max_attempts: self.max_attempts, base_backoff: self.base_backoff })
    }
}

//! Retrying upstream catalog client
//!
//! The generic proxy path gets connect-level retries with exponential
//! backoff; this is the one place retries exist (advisory fetches in
//! `reelguard-core` are deliberately single-attempt).

use std::time::Duration;

use backon::{BlockingRetryable, ExponentialBuilder};
use reelguard_core::config::UpstreamConfig;
use reelguard_core::{ReelguardError, Result};

pub struct UpstreamClient {
    client: reqwest::blocking::Client,
    base_url: String,
    backoff: ExponentialBuilder,
}

impl UpstreamClient {
    pub fn new(cfg: &UpstreamConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(cfg.user_agent.clone())
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| {
                ReelguardError::upstream_with_source("failed to build upstream client", e)
            })?;

        let backoff = ExponentialBuilder::default()
            .with_min_delay(Duration::from_secs_f64(cfg.backoff_factor_secs))
            .with_factor(2.0)
            .with_max_times(cfg.connect_retries);

        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_owned(),
            backoff,
        })
    }

    /// GET `{base_url}{path_and_query}` and deserialize the JSON body.
    ///
    /// Connection-level failures are retried per the configured backoff;
    /// a non-success status or an undecodable body is an upstream error.
    pub fn get_json(&self, path_and_query: &str) -> Result<serde_json::Value> {
        let url = format!("{}{}", self.base_url, path_and_query);

        let send = || self.client.get(&url).send();
        let resp = send
            .retry(self.backoff)
            .when(|e: &reqwest::Error| e.is_connect() || e.is_timeout())
            .notify(|e, dur| {
                tracing::debug!(url = %url, error = %e, backoff_ms = dur.as_millis() as u64, "retrying upstream request");
            })
            .call()
            .map_err(|e| {
                ReelguardError::upstream_with_source(
                    format!("failed to fetch data from the external API at {url}"),
                    e,
                )
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ReelguardError::upstream(format!(
                "external API returned status {status} for {url}"
            )));
        }

        resp.json().map_err(|e| {
            ReelguardError::upstream_with_source(
                format!("external API returned an unreadable body for {url}"),
                e,
            )
        })
    }
}

//! Advisory resolver
//!
//! Lookup-or-compute-and-persist of sensitivity levels. The persisted store
//! fronts a slow, fragile external scrape: a cached id never touches the
//! network, and every failure mode of the fetch/parse path collapses to the
//! most restrictive level without surfacing an error to the caller.

use std::sync::Arc;
use std::time::Duration;

use crate::config::AdvisoryConfig;
use crate::errors::{ReelguardError, Result};
use crate::extract::{LabelExtractor, NudityAdvisoryExtractor};
use crate::sensitivity::SensitivityLevel;
use crate::store::SensitivityStore;

/// Resolution of a content id to its sensitivity level.
///
/// Infallible by contract: implementations return `Severe` in the worst
/// case rather than erroring.
pub trait ResolveSensitivity: Send + Sync {
    fn resolve(&self, content_id: &str) -> SensitivityLevel;
}

impl<T: ResolveSensitivity + ?Sized> ResolveSensitivity for Arc<T> {
    fn resolve(&self, content_id: &str) -> SensitivityLevel {
        (**self).resolve(content_id)
    }
}

/// Production resolver backed by the persisted store and the external
/// content-advisory endpoint.
pub struct AdvisoryResolver {
    store: Arc<SensitivityStore>,
    client: reqwest::blocking::Client,
    base_url: String,
    extractor: Box<dyn LabelExtractor>,
}

impl AdvisoryResolver {
    /// Build a resolver with the production advisory-page extractor.
    pub fn new(store: Arc<SensitivityStore>, cfg: &AdvisoryConfig) -> Result<Self> {
        Self::with_extractor(store, cfg, Box::new(NudityAdvisoryExtractor::new()))
    }

    /// Build a resolver with an explicit extractor (tests inject fakes here).
    pub fn with_extractor(
        store: Arc<SensitivityStore>,
        cfg: &AdvisoryConfig,
        extractor: Box<dyn LabelExtractor>,
    ) -> Result<Self> {
        // Single-attempt client: retries are a feature of the generic proxy
        // path only, never of advisory fetches.
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| {
                ReelguardError::advisory_with_source("failed to build advisory client", e)
            })?;

        Ok(Self {
            store,
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_owned(),
            extractor,
        })
    }

    /// Fetch the advisory page body for `content_id`, one attempt.
    ///
    /// Any network error, non-success status, or unreadable body is a miss:
    /// the caller falls back to `Severe` and writes nothing.
    fn fetch_advisory_page(&self, content_id: &str) -> Option<String> {
        let url = format!("{}/title/{}/parentalguide", self.base_url, content_id);

        match self.client.get(&url).send() {
            Ok(resp) if resp.status().is_success() => match resp.text() {
                Ok(body) => Some(body),
                Err(e) => {
                    tracing::debug!(content_id, error = %e, "advisory body unreadable");
                    None
                }
            },
            Ok(resp) => {
                tracing::debug!(
                    content_id,
                    status = resp.status().as_u16(),
                    "advisory fetch returned non-success"
                );
                None
            }
            Err(e) => {
                tracing::debug!(content_id, error = %e, "advisory fetch failed");
                None
            }
        }
    }
}

impl ResolveSensitivity for AdvisoryResolver {
    fn resolve(&self, content_id: &str) -> SensitivityLevel {
        // Fast path: cached ids incur no network access.
        match self.store.lookup(content_id) {
            Ok(Some(level)) => {
                tracing::trace!(content_id, %level, "sensitivity cache hit");
                return level;
            }
            Ok(None) => {}
            Err(e) => {
                // A broken read is treated as a miss; the fetch below still
                // gives a usable answer.
                tracing::warn!(content_id, error = %e, "store lookup failed, treating as miss");
            }
        }

        let Some(body) = self.fetch_advisory_page(content_id) else {
            // Transient failure: do not durably remember it as a rating.
            return SensitivityLevel::Severe;
        };

        let Some(label) = self.extractor.extract_label(&body) else {
            tracing::debug!(content_id, "advisory markup missing, defaulting to Severe");
            return SensitivityLevel::Severe;
        };

        let level = SensitivityLevel::from_label(&label);

        if let Err(e) = self.store.insert_if_absent(content_id, level) {
            tracing::warn!(content_id, error = %e, "failed to persist sensitivity level");
        }

        tracing::debug!(content_id, label, %level, "resolved sensitivity level");
        level
    }
}

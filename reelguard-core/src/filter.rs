//! Catalog filtering pass
//!
//! Applies the sensitivity threshold and the certification blocklist across
//! a page of upstream catalog items, preserving input order among retained
//! items. Resolution happens sequentially, one item at a time; an uncached
//! item costs one advisory fetch (see `advisory`).

use serde::{Deserialize, Serialize};

use crate::advisory::ResolveSensitivity;
use crate::sensitivity::SensitivityLevel;

/// Certifications excluded unconditionally, independent of the sensitivity
/// threshold. Deliberately a literal: a laxer threshold does not loosen
/// this list.
pub const BLOCKED_CERTIFICATIONS: [&str; 2] = ["R", "NR"];

/// One entry of an upstream catalog listing. Transient, never persisted.
///
/// Only `_id` and `certification` are inspected; everything else passes
/// through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certification: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Filtering pass over catalog items, generic over the resolver so tests
/// can supply a canned one.
pub struct CatalogFilter<R> {
    resolver: R,
}

impl<R: ResolveSensitivity> CatalogFilter<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// Retain items whose sensitivity level is at most `threshold` and
    /// whose certification is not blocked. Input order is preserved.
    pub fn filter(
        &self,
        items: Vec<CatalogItem>,
        threshold: SensitivityLevel,
    ) -> Vec<CatalogItem> {
        items
            .into_iter()
            .filter(|item| self.retain(item, threshold))
            .collect()
    }

    fn retain(&self, item: &CatalogItem, threshold: SensitivityLevel) -> bool {
        let Some(id) = item.id.as_deref() else {
            // No id means no advisory lookup is possible; exclude.
            tracing::debug!("catalog item without _id excluded");
            return false;
        };

        if self.resolver.resolve(id) > threshold {
            return false;
        }

        if let Some(cert) = item.certification.as_deref() {
            if BLOCKED_CERTIFICATIONS.contains(&cert) {
                tracing::trace!(id, cert, "excluded by certification");
                return false;
            }
        }

        true
    }
}

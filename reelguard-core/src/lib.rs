//! Core logic for reelguard, a sensitivity-filtering catalog proxy.
//!
//! This crate implements:
//! - A persisted sensitivity store (SQLite) keyed by content id
//! - The advisory resolver: lookup-or-scrape-and-persist of sensitivity
//!   levels, fail-closed to the most restrictive level on any failure
//! - The catalog filter that applies level threshold and certification
//!   blocklist across upstream catalog listings
//!
//! The HTTP surface lives in `reelguard-server`; everything here is
//! transport-agnostic and takes explicit handles rather than globals.

pub mod advisory;
pub mod config;
pub mod errors;
pub mod extract;
pub mod filter;
pub mod sensitivity;
pub mod store;

pub use advisory::{AdvisoryResolver, ResolveSensitivity};
pub use config::ReelguardConfig;
pub use errors::{ErrorCategory, ReelguardError, Result};
pub use extract::{LabelExtractor, NudityAdvisoryExtractor};
pub use filter::{BLOCKED_CERTIFICATIONS, CatalogFilter, CatalogItem};
pub use sensitivity::SensitivityLevel;
pub use store::SensitivityStore;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

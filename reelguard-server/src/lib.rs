//! HTTP surface for reelguard.
//!
//! Thin plumbing around `reelguard-core`: route parsing, the retrying
//! upstream client for the generic proxy path, and the request handlers
//! that wire the advisory resolver and catalog filter to the wire.
//!
//! The service is synchronous and request-per-call: a fixed set of worker
//! threads share one `tiny_http` listener and one `App`.

pub mod app;
pub mod routes;
pub mod upstream;

pub use app::{App, handle_request, spawn_workers};
pub use routes::Route;
pub use upstream::UpstreamClient;

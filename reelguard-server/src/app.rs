//! Request handlers and service wiring
//!
//! `App` owns the long-lived pieces (store handle, resolver, filter,
//! upstream client) and maps parsed routes to JSON responses. All surfaced
//! errors carry a structured `{error, message}` payload; advisory scrape
//! and parse failures never surface — they bias filtering toward exclusion
//! inside the core instead.

use std::sync::Arc;
use std::thread::JoinHandle;

use serde::Serialize;

use reelguard_core::{
    AdvisoryResolver, CatalogFilter, CatalogItem, ReelguardConfig, ResolveSensitivity, Result,
    SensitivityLevel, SensitivityStore,
};

use crate::routes::{self, Route};
use crate::upstream::UpstreamClient;

/// Structured error payload returned for every surfaced error.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

/// Status code plus JSON body, transport-agnostic for testability.
#[derive(Debug)]
pub struct ApiResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl ApiResponse {
    fn ok(body: serde_json::Value) -> Self {
        Self { status: 200, body }
    }

    fn error(status: u16, error: &'static str, message: String) -> Self {
        let body = ErrorBody { error, message };
        Self {
            status,
            // ErrorBody serialization is infallible (two plain fields).
            body: serde_json::to_value(body).unwrap_or_default(),
        }
    }
}

/// Long-lived service state shared by all worker threads.
pub struct App {
    threshold: SensitivityLevel,
    resolver: Arc<AdvisoryResolver>,
    filter: CatalogFilter<Arc<AdvisoryResolver>>,
    upstream: UpstreamClient,
}

impl App {
    /// Wire up the service from config and an initialized store handle.
    pub fn from_config(cfg: &ReelguardConfig, store: Arc<SensitivityStore>) -> Result<Self> {
        let resolver = Arc::new(AdvisoryResolver::new(store, &cfg.advisory)?);
        let filter = CatalogFilter::new(Arc::clone(&resolver));
        let upstream = UpstreamClient::new(&cfg.upstream)?;

        Ok(Self {
            threshold: cfg.threshold(),
            resolver,
            filter,
            upstream,
        })
    }

    /// Dispatch a parsed route to its handler.
    pub fn handle(&self, route: Route) -> ApiResponse {
        match route {
            Route::Media { media_type, id } => self.handle_media(media_type, &id),
            Route::MediaMissingId { media_type } => ApiResponse::error(
                400,
                "missing_id",
                format!("no content id provided on /{media_type} request"),
            ),
            Route::Catalog { path_and_query } => self.handle_catalog(&path_and_query),
        }
    }

    /// Single-item endpoint: forward the title only if it passes the
    /// sensitivity threshold.
    fn handle_media(&self, media_type: routes::MediaType, id: &str) -> ApiResponse {
        if self.resolver.resolve(id) > self.threshold {
            return ApiResponse::error(
                400,
                "filtered_or_missing",
                format!("{media_type} {id} is filtered or missing"),
            );
        }

        match self.upstream.get_json(&format!("/{media_type}/{id}")) {
            Ok(body) => ApiResponse::ok(body),
            Err(e) => {
                tracing::warn!(id, error = %e, "single-item upstream fetch failed");
                ApiResponse::error(502, "upstream_error", e.to_string())
            }
        }
    }

    /// List endpoint: forward the full path to the upstream base, filter
    /// the returned listing at the configured threshold.
    fn handle_catalog(&self, path_and_query: &str) -> ApiResponse {
        let payload = match self.upstream.get_json(path_and_query) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(path = path_and_query, error = %e, "catalog fetch failed");
                return ApiResponse::error(502, "upstream_error", e.to_string());
            }
        };

        let items: Vec<CatalogItem> = match serde_json::from_value(payload) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(path = path_and_query, error = %e, "unexpected catalog payload");
                return ApiResponse::error(
                    502,
                    "upstream_payload",
                    "external API returned an unexpected payload (expected a list)".to_owned(),
                );
            }
        };

        let total = items.len();
        let retained = self.filter.filter(items, self.threshold);
        tracing::debug!(
            path = path_and_query,
            total,
            retained = retained.len(),
            "catalog listing filtered"
        );

        match serde_json::to_value(retained) {
            Ok(body) => ApiResponse::ok(body),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize filtered listing");
                ApiResponse::error(500, "internal_error", "failed to encode response".to_owned())
            }
        }
    }
}

/// Serve one request: parse, dispatch, respond. Respond failures are
/// logged, not fatal (the client likely went away).
pub fn handle_request(app: &App, request: tiny_http::Request) {
    if request.method() != &tiny_http::Method::Get {
        let resp = ApiResponse::error(
            405,
            "method_not_allowed",
            format!("{} is not supported", request.method()),
        );
        respond(request, resp);
        return;
    }

    let route = routes::parse(request.url());
    let resp = app.handle(route);
    respond(request, resp);
}

fn respond(request: tiny_http::Request, resp: ApiResponse) {
    let mut response = tiny_http::Response::from_string(resp.body.to_string())
        .with_status_code(resp.status);
    if let Ok(header) =
        tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
    {
        response = response.with_header(header);
    }

    if let Err(e) = request.respond(response) {
        tracing::debug!(error = %e, "failed to write response");
    }
}

/// Start `workers` request threads sharing the listener and the app.
pub fn spawn_workers(
    server: Arc<tiny_http::Server>,
    app: Arc<App>,
    workers: usize,
) -> Vec<JoinHandle<()>> {
    (0..workers)
        .map(|worker| {
            let server = Arc::clone(&server);
            let app = Arc::clone(&app);
            std::thread::spawn(move || {
                tracing::debug!(worker, "request worker started");
                for request in server.incoming_requests() {
                    handle_request(&app, request);
                }
            })
        })
        .collect()
}

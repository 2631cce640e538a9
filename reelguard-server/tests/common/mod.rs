//! Shared test fixtures: local HTTP servers standing in for the upstream
//! catalog and the advisory host, plus service wiring on an ephemeral port.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use reelguard_core::{ReelguardConfig, SensitivityStore};
use reelguard_server::{App, spawn_workers};

/// Local HTTP fixture. The handler maps a request path to (status, body).
pub struct MockServer {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl MockServer {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Spawn a fixture server on an ephemeral port.
pub fn spawn(handler: impl Fn(&str) -> (u16, String) + Send + Sync + 'static) -> MockServer {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind mock server");
    let addr = server.server_addr().to_ip().expect("mock server ip");
    let hits = Arc::new(AtomicUsize::new(0));

    let thread_hits = Arc::clone(&hits);
    std::thread::spawn(move || {
        for request in server.incoming_requests() {
            thread_hits.fetch_add(1, Ordering::SeqCst);
            let (status, body) = handler(request.url());
            let response = tiny_http::Response::from_string(body).with_status_code(status);
            let _ = request.respond(response);
        }
    });

    MockServer {
        base_url: format!("http://{addr}"),
        hits,
    }
}

/// Minimal advisory page carrying the given severity label.
pub fn advisory_page(label: &str) -> String {
    format!(
        r#"<html><body>
        <section id="advisory-nudity">
            <div class="advisory-severity-vote__container ipl-zebra-list__item">
                <span class="ipl-status-pill">{label}</span> 12 of 20 votes
            </div>
        </section>
        </body></html>"#
    )
}

/// Start the full service (in-memory store) against the given fixtures and
/// return its base URL.
pub fn start_service(upstream_base: &str, advisory_base: &str) -> String {
    let toml = format!(
        r#"
        sensitivity_threshold = 0

        [upstream]
        base_url = "{upstream_base}"
        user_agent = "reelguard-test"
        connect_retries = 1
        backoff_factor_secs = 0.01
        timeout_secs = 5

        [advisory]
        base_url = "{advisory_base}"
        timeout_secs = 5
        "#
    );
    let cfg = ReelguardConfig::parse(&toml).expect("test config");

    let store = Arc::new(SensitivityStore::connect_in_memory().expect("store"));
    let app = Arc::new(App::from_config(&cfg, store).expect("app"));

    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind service");
    let addr = server.server_addr().to_ip().expect("service ip");
    spawn_workers(Arc::new(server), app, 2);

    format!("http://{addr}")
}

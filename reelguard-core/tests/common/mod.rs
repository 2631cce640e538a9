//! Shared test fixtures: a local HTTP server standing in for the external
//! advisory host.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Local HTTP fixture. The handler maps a request path to (status, body).
pub struct MockServer {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl MockServer {
    /// Total requests served so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Spawn a fixture server on an ephemeral port. The serving thread lives
/// for the remainder of the test process.
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
            <h4>Sex &amp; Nudity</h4>
            <div class="advisory-severity-vote__container ipl-zebra-list__item">
                <span class="ipl-status-pill">{label}</span>
                <a href="/vote">12 of 20 found this to have {label}</a>
            </div>
        </section>
        </body></html>"#
    )
}

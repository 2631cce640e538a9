//! End-to-end proxy flows against local fixtures: list filtering, the
//! single-item gate, and surfaced error payload shapes.

mod common;

use pretty_assertions::assert_eq;
use serde_json::json;

/// Advisory fixture: pick the label from the requested title id.
/// Ids look like `tt_none`, `tt_mild`, `tt_severe`; anything else 404s.
fn advisory_handler(url: &str) -> (u16, String) {
    for label in ["None", "Mild", "Moderate", "Severe"] {
        if url.contains(&format!("tt_{}", label.to_lowercase())) {
            return (200, common::advisory_page(label));
        }
    }
    (404, "no such title".to_owned())
}

fn get(url: &str) -> reqwest::blocking::Response {
    reqwest::blocking::get(url).expect("request")
}

#[test]
fn list_endpoint_filters_and_preserves_order_and_fields() {
    let advisory = common::spawn(advisory_handler);
    let upstream = common::spawn(|url| {
        assert_eq!(url, "/movies/all/1?sort=trending");
        let listing = json!([
            {"_id": "tt_none", "certification": "PG", "title": "Keep Me", "year": 2001},
            {"_id": "tt_mild", "certification": "PG", "title": "Too Mild"},
            {"_id": "tt_none", "certification": "R", "title": "Blocked Cert"},
            {"certification": "PG", "title": "No Id"},
        ]);
        (200, listing.to_string())
    });

    let service = common::start_service(&upstream.base_url, &advisory.base_url);
    let resp = get(&format!("{service}/movies/all/1?sort=trending"));

    assert_eq!(resp.status().as_u16(), 200);
    let body: serde_json::Value = resp.json().expect("json body");
    assert_eq!(
        body,
        json!([
            {"_id": "tt_none", "certification": "PG", "title": "Keep Me", "year": 2001}
        ])
    );
}

#[test]
fn single_item_passing_title_is_forwarded() {
    let advisory = common::spawn(advisory_handler);
    let upstream = common::spawn(|url| {
        assert_eq!(url, "/movie/tt_none");
        (200, json!({"_id": "tt_none", "title": "Keep Me"}).to_string())
    });

    let service = common::start_service(&upstream.base_url, &advisory.base_url);
    let resp = get(&format!("{service}/movie/tt_none"));

    assert_eq!(resp.status().as_u16(), 200);
    let body: serde_json::Value = resp.json().expect("json body");
    assert_eq!(body, json!({"_id": "tt_none", "title": "Keep Me"}));
}

#[test]
fn single_item_above_threshold_is_rejected_without_upstream_fetch() {
    let advisory = common::spawn(advisory_handler);
    let upstream = common::spawn(|_| (200, "{}".to_owned()));

    let service = common::start_service(&upstream.base_url, &advisory.base_url);
    let resp = get(&format!("{service}/show/tt_severe"));

    assert_eq!(resp.status().as_u16(), 400);
    let body: serde_json::Value = resp.json().expect("json body");
    assert_eq!(body["error"], "filtered_or_missing");
    assert!(
        body["message"]
            .as_str()
            .expect("message")
            .contains("tt_severe")
    );
    assert_eq!(upstream.hits(), 0);
}

#[test]
fn media_path_without_id_is_a_client_error() {
    let advisory = common::spawn(advisory_handler);
    let upstream = common::spawn(|_| (200, "[]".to_owned()));

    let service = common::start_service(&upstream.base_url, &advisory.base_url);
    let resp = get(&format!("{service}/movie"));

    assert_eq!(resp.status().as_u16(), 400);
    let body: serde_json::Value = resp.json().expect("json body");
    assert_eq!(body["error"], "missing_id");
}

#[test]
fn upstream_failure_surfaces_structured_error() {
    let advisory = common::spawn(advisory_handler);
    let upstream = common::spawn(|_| (500, "boom".to_owned()));

    let service = common::start_service(&upstream.base_url, &advisory.base_url);
    let resp = get(&format!("{service}/movies/popular"));

    assert_eq!(resp.status().as_u16(), 502);
    let body: serde_json::Value = resp.json().expect("json body");
    assert_eq!(body["error"], "upstream_error");
    assert!(body["message"].as_str().expect("message").contains("500"));
}

#[test]
fn non_list_catalog_payload_surfaces_structured_error() {
    let advisory = common::spawn(advisory_handler);
    let upstream = common::spawn(|_| (200, json!({"unexpected": true}).to_string()));

    let service = common::start_service(&upstream.base_url, &advisory.base_url);
    let resp = get(&format!("{service}/weird"));

    assert_eq!(resp.status().as_u16(), 502);
    let body: serde_json::Value = resp.json().expect("json body");
    assert_eq!(body["error"], "upstream_payload");
}

#[test]
fn non_get_methods_are_rejected() {
    let advisory = common::spawn(advisory_handler);
    let upstream = common::spawn(|_| (200, "[]".to_owned()));

    let service = common::start_service(&upstream.base_url, &advisory.base_url);
    let client = reqwest::blocking::Client::new();
    let resp = client
        .post(format!("{service}/movies/all"))
        .send()
        .expect("request");

    assert_eq!(resp.status().as_u16(), 405);
    let body: serde_json::Value = resp.json().expect("json body");
    assert_eq!(body["error"], "method_not_allowed");
}

//! Common test utilities for integration tests.
//!
//! Tests run against the in-memory workbook backend, so no external
//! services are required.

// Allow dead code in this module - these are helper utilities that may not
// be used by all integration tests.
#![allow(dead_code)]

use axum::Router;
use std::sync::Arc;

use domain::models::Sheet;
use persistence::{DynSheetStore, MemorySheetStore};
use sheetgate_api::{app::create_app, config::Config};

/// Test configuration built from embedded defaults.
pub fn test_config() -> Config {
    Config::load_for_test(&[]).expect("Failed to load test config")
}

/// Test configuration with overrides applied on top of the defaults.
pub fn test_config_with(overrides: &[(&str, &str)]) -> Config {
    Config::load_for_test(overrides).expect("Failed to load test config")
}

/// Create a test application router over the given store.
pub fn create_test_app(config: Config, store: DynSheetStore) -> Router {
    create_app(config, store)
}

/// Build row data from string literals.
pub fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
    data.iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect()
}

/// A workbook holding a conventional PIN sheet with the given codes.
pub fn store_with_pins(codes: &[&str]) -> Arc<MemorySheetStore> {
    let mut pin_rows = vec![vec!["PIN".to_string()]];
    pin_rows.extend(codes.iter().map(|c| vec![c.to_string()]));
    Arc::new(MemorySheetStore::with_sheets(vec![Sheet::with_rows(
        "PINs", pin_rows,
    )]))
}

/// Build a webhook POST request with a raw string body.
pub fn post_request(body: &str) -> axum::http::Request<axum::body::Body> {
    use axum::{
        body::Body,
        http::{header, Method, Request},
    };

    Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

/// Build a webhook POST request from a JSON value.
pub fn post_json(body: serde_json::Value) -> axum::http::Request<axum::body::Body> {
    post_request(&body.to_string())
}

/// Build a webhook POST request with an arbitrary byte body.
pub fn post_bytes(body: Vec<u8>) -> axum::http::Request<axum::body::Body> {
    use axum::{
        body::Body,
        http::{header, Method, Request},
    };

    Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("Failed to build request")
}

/// Build a GET request.
pub fn get_request(uri: &str) -> axum::http::Request<axum::body::Body> {
    use axum::{
        body::Body,
        http::{Method, Request},
    };

    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request")
}

/// Build an OPTIONS request against the webhook path.
pub fn options_request() -> axum::http::Request<axum::body::Body> {
    use axum::{
        body::Body,
        http::{Method, Request},
    };

    Request::builder()
        .method(Method::OPTIONS)
        .uri("/")
        .body(Body::empty())
        .expect("Failed to build request")
}

/// Helper to parse JSON response body.
pub async fn parse_response_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null)
}

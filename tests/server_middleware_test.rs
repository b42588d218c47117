// ABOUTME: Integration tests for the assembled router and its middleware stack
// ABOUTME: Covers request ID propagation, body size limits and CORS preflight
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use axum::http::StatusCode;
use helpers::axum_test::AxumTestRequest;
use helpers::cart_csv;
use metabolic_lab_server::config::ServerConfig;
use metabolic_lab_server::server::build_router;
use serde_json::json;
use std::sync::Arc;

fn app_with(config: ServerConfig) -> axum::Router {
    build_router(Arc::new(config))
}

#[tokio::test]
async fn test_request_id_generated() {
    let response = AxumTestRequest::get("/health")
        .send(app_with(ServerConfig::default()))
        .await;

    assert_eq!(response.status(), 200);
    let request_id = response.header("x-request-id").unwrap();
    assert!(!request_id.is_empty());
}

#[tokio::test]
async fn test_request_id_propagated() {
    let response = AxumTestRequest::get("/health")
        .header("x-request-id", "lab-test-42")
        .send(app_with(ServerConfig::default()))
        .await;

    assert_eq!(response.header("x-request-id").as_deref(), Some("lab-test-42"));
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let mut config = ServerConfig::default();
    config.limits.max_csv_bytes = 64;

    let response = AxumTestRequest::post("/api/calculate-rmr")
        .json(&json!({ "csv_data": cart_csv::steady_state(10) }))
        .send(app_with(config))
        .await
        .assert_status(StatusCode::PAYLOAD_TOO_LARGE);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn test_full_router_serves_report() {
    let response = AxumTestRequest::post("/api/calculate-rmr")
        .json(&json!({ "csv_data": cart_csv::steady_state(10) }))
        .send(app_with(ServerConfig::default()))
        .await
        .assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["stats"]["vo2"]["sample_size"], 20);
    assert_eq!(body["stats"]["rer"]["sample_size"], 20);
    assert_eq!(body["skipped_rows"], 1);
}

#[tokio::test]
async fn test_cors_preflight_allowed() {
    let response = AxumTestRequest::options("/api/calculate-rmr")
        .header("origin", "https://lab.example.com")
        .header("access-control-request-method", "POST")
        .send(app_with(ServerConfig::default()))
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.header("access-control-allow-origin").as_deref(),
        Some("*")
    );
}

#[tokio::test]
async fn test_unknown_route_not_found() {
    let response = AxumTestRequest::get("/api/unknown")
        .send(app_with(ServerConfig::default()))
        .await;

    assert_eq!(response.status(), 404);
}

// ABOUTME: Unit tests for environment-based server configuration
// ABOUTME: Validates defaults, overrides and rejection of malformed values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use metabolic_core::errors::ErrorCode;
use metabolic_lab_server::config::ServerConfig;
use serial_test::serial;
use std::env;
use std::net::{IpAddr, Ipv4Addr};

const VARIABLES: [&str; 6] = [
    "HTTP_HOST",
    "HTTP_PORT",
    "DEFAULT_TRIM_MINUTES",
    "MAX_CSV_BYTES",
    "REQUEST_TIMEOUT_SECS",
    "CORS_ALLOWED_ORIGINS",
];

fn clear_env() {
    for key in VARIABLES {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_defaults_when_unset() {
    clear_env();
    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    assert_eq!(config.http.port, 5000);
    assert!(config.pipeline.default_trim_minutes.abs() < f64::EPSILON);
    assert_eq!(config.limits.max_csv_bytes, 5 * 1024 * 1024);
    assert_eq!(config.limits.request_timeout_secs, 30);
    assert_eq!(config.cors.origins(), vec!["*"]);
}

#[test]
#[serial]
fn test_overrides_from_env() {
    clear_env();
    env::set_var("HTTP_HOST", "127.0.0.1");
    env::set_var("HTTP_PORT", "8081");
    env::set_var("DEFAULT_TRIM_MINUTES", "5");
    env::set_var("MAX_CSV_BYTES", "1024");
    env::set_var("REQUEST_TIMEOUT_SECS", "10");
    env::set_var("CORS_ALLOWED_ORIGINS", "https://lab.example.com");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8081");
    assert!((config.pipeline.default_trim_minutes - 5.0).abs() < f64::EPSILON);
    assert_eq!(config.limits.max_csv_bytes, 1024);
    assert_eq!(config.limits.request_timeout().as_secs(), 10);
    assert_eq!(config.cors.origins(), vec!["https://lab.example.com"]);
}

#[test]
#[serial]
fn test_malformed_port_rejected() {
    clear_env();
    env::set_var("HTTP_PORT", "not-a-port");

    let err = ServerConfig::from_env().unwrap_err();
    clear_env();

    assert_eq!(err.code, ErrorCode::ConfigInvalid);
    assert!(err.message.contains("HTTP_PORT"));
}

#[test]
#[serial]
fn test_negative_trim_minutes_rejected() {
    clear_env();
    env::set_var("DEFAULT_TRIM_MINUTES", "-2");

    let err = ServerConfig::from_env().unwrap_err();
    clear_env();

    assert_eq!(err.code, ErrorCode::ConfigInvalid);
    assert_eq!(err.details.unwrap()["variable"], "DEFAULT_TRIM_MINUTES");
}

#[test]
#[serial]
fn test_zero_body_limit_rejected() {
    clear_env();
    env::set_var("MAX_CSV_BYTES", "0");

    let err = ServerConfig::from_env().unwrap_err();
    clear_env();

    assert_eq!(err.code, ErrorCode::ConfigInvalid);
}

// ABOUTME: System-wide constants and configuration defaults for the metabolic lab server
// ABOUTME: Service names, API paths, and environment variable defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Physiological constants live in `metabolic_core::constants`; this module
//! only holds server-level values.

/// Service names
pub mod service_names {
    /// Metabolic lab server service name
    pub const METABOLIC_LAB_SERVER: &str = "metabolic_lab_server";
}

/// Route paths
pub mod api_paths {
    /// Liveness probe
    pub const HEALTH: &str = "/health";
    /// Readiness probe
    pub const READY: &str = "/ready";
    /// Multi-step CSV processing
    pub const PROCESS_CSV: &str = "/api/process-csv";
    /// One-shot RMR calculation
    pub const CALCULATE_RMR: &str = "/api/calculate-rmr";
    /// Body composition summary
    pub const BODY_COMPOSITION: &str = "/api/body-composition";
}

/// Defaults applied when an environment variable is unset
pub mod defaults {
    /// Bind address
    pub const HTTP_HOST: &str = "0.0.0.0";
    /// Bind port
    pub const HTTP_PORT: u16 = 5000;
    /// Warm-up minutes trimmed when a request omits `minutesToRemove`
    pub const TRIM_MINUTES: f64 = 0.0;
    /// Request body limit (5 MiB)
    pub const MAX_CSV_BYTES: usize = 5 * 1024 * 1024;
    /// Per-request timeout
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Allowed CORS origins
    pub const CORS_ALLOWED_ORIGINS: &str = "*";
    /// Request ID header name
    pub const REQUEST_ID_HEADER: &str = "x-request-id";
}

// ABOUTME: HTTP middleware for cross-origin access and request tracing
// ABOUTME: Provides CORS setup and request span creation keyed by request ID
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// CORS layer built from configuration
pub mod cors;
/// Request span creation for `TraceLayer`
pub mod tracing;

pub use self::cors::setup_cors;
pub use self::tracing::{create_request_span, RequestSpan};

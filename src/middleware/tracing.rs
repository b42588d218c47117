// ABOUTME: Request tracing span creation for correlation and structured logging
// ABOUTME: Tags every HTTP request span with the request ID set by the request-id layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::defaults::REQUEST_ID_HEADER;
use http::Request;
use tower_http::trace::MakeSpan;
use tracing::Span;

/// Create a tracing span for HTTP requests
#[must_use]
pub fn create_request_span(method: &str, path: &str, request_id: &str) -> Span {
    tracing::info_span!(
        "http_request",
        method = %method,
        path = %path,
        request_id = %request_id,
    )
}

/// [`MakeSpan`] for `TraceLayer` that records the request ID header
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("unknown");
        create_request_span(request.method().as_str(), request.uri().path(), request_id)
    }
}

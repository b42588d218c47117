// ABOUTME: HTTP server assembly: router, middleware stack and graceful shutdown
// ABOUTME: Binds the configured address and serves until Ctrl+C or SIGTERM
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::ServerConfig;
use crate::constants::defaults::REQUEST_ID_HEADER;
use crate::middleware::{setup_cors, RequestSpan};
use crate::routes::{BodyCompositionRoutes, HealthRoutes, MetabolicRoutes};
use axum::extract::DefaultBodyLimit;
use axum::Router;
use http::{HeaderName, StatusCode};
use std::future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Build the application router with every route and the middleware stack.
///
/// Layers run outermost first: request ID, tracing, ID propagation,
/// timeout, CORS. Bodies over `max_csv_bytes` are rejected by the JSON
/// extractor with `PAYLOAD_TOO_LARGE`.
pub fn build_router(config: Arc<ServerConfig>) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(request_id_header.clone(), MakeRequestUuid))
        .layer(TraceLayer::new_for_http().make_span_with(RequestSpan))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.limits.request_timeout(),
        ))
        .layer(setup_cors(&config.cors));
    let body_limit = DefaultBodyLimit::max(config.limits.max_csv_bytes);

    Router::new()
        .merge(HealthRoutes::routes())
        .merge(MetabolicRoutes::routes(config))
        .merge(BodyCompositionRoutes::routes())
        .layer(body_limit)
        .layer(middleware)
}

/// Bind and serve until a shutdown signal arrives
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    let app = build_router(Arc::new(config));

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Metabolic lab server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = future::pending::<()>();

    tokio::select! {
        () = ctrl_c => warn!("Received Ctrl+C, shutting down"),
        () = terminate => warn!("Received terminate signal, shutting down"),
    }
}

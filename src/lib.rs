// ABOUTME: Main library entry point for the metabolic lab server
// ABOUTME: HTTP plumbing, configuration and logging around the metabolic calculation core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Metabolic Lab Server
//!
//! Serves resting metabolic rate assessments computed from indirect
//! calorimetry CSV exports. The numeric work lives in the
//! `metabolic_intelligence` crate; this crate exposes it over HTTP.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use metabolic_lab_server::config::ServerConfig;
//! use metabolic_lab_server::{logging, server};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     logging::init_from_env()?;
//!     let config = ServerConfig::from_env()?;
//!     server::serve(config).await
//! }
//! ```

/// Environment-based server configuration
pub mod config;

/// Service names, route paths and configuration defaults
pub mod constants;

/// Unified error types re-exported from `metabolic_core`
pub mod errors;

/// Structured logging setup
pub mod logging;

/// CORS and request tracing middleware
pub mod middleware;

/// HTTP route handlers
pub mod routes;

/// Router assembly and graceful shutdown
pub mod server;

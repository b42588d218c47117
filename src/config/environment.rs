// ABOUTME: Environment-based server configuration loaded once at startup
// ABOUTME: Parses bind address, pipeline defaults, request limits and CORS origins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration comes from environment variables only. Unset variables fall
//! back to `crate::constants::defaults`; set but malformed variables are a
//! `ConfigInvalid` error naming the variable.

use crate::constants::defaults;
use crate::errors::{AppError, AppResult, ErrorCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::env;
use std::fmt::Display;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Bind address
    pub http: HttpConfig,
    /// CSV pipeline defaults
    pub pipeline: PipelineConfig,
    /// Request limits
    pub limits: LimitsConfig,
    /// Cross-origin settings
    pub cors: CorsConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpConfig {
    /// Interface to bind
    pub host: IpAddr,
    /// Port to bind
    pub port: u16,
}

/// Defaults for the CSV processing steps
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PipelineConfig {
    /// Minutes trimmed when a step-2 request omits `minutesToRemove`
    pub default_trim_minutes: f64,
}

/// Request limits
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LimitsConfig {
    /// Maximum request body size in bytes
    pub max_csv_bytes: usize,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl LimitsConfig {
    /// Request timeout as a [`Duration`]
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// CORS (Cross-Origin Resource Sharing) configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins, or `*`
    pub allowed_origins: String,
}

impl CorsConfig {
    /// Allowed origins as a list; `["*"]` for any
    #[must_use]
    pub fn origins(&self) -> Vec<String> {
        parse_origins(&self.allowed_origins)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig {
                host: IpAddr::from([0, 0, 0, 0]),
                port: defaults::HTTP_PORT,
            },
            pipeline: PipelineConfig {
                default_trim_minutes: defaults::TRIM_MINUTES,
            },
            limits: LimitsConfig {
                max_csv_bytes: defaults::MAX_CSV_BYTES,
                request_timeout_secs: defaults::REQUEST_TIMEOUT_SECS,
            },
            cors: CorsConfig {
                allowed_origins: defaults::CORS_ALLOWED_ORIGINS.to_owned(),
            },
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::ConfigInvalid` if a variable is set to a value that
    /// cannot be parsed or is out of range
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let default_trim_minutes: f64 =
            parse_env("DEFAULT_TRIM_MINUTES", &defaults::TRIM_MINUTES.to_string())?;
        if !default_trim_minutes.is_finite() || default_trim_minutes < 0.0 {
            return Err(invalid_value(
                "DEFAULT_TRIM_MINUTES",
                "must be a non-negative number",
            ));
        }

        let max_csv_bytes: usize =
            parse_env("MAX_CSV_BYTES", &defaults::MAX_CSV_BYTES.to_string())?;
        if max_csv_bytes == 0 {
            return Err(invalid_value("MAX_CSV_BYTES", "must be greater than zero"));
        }

        let request_timeout_secs: u64 = parse_env(
            "REQUEST_TIMEOUT_SECS",
            &defaults::REQUEST_TIMEOUT_SECS.to_string(),
        )?;
        if request_timeout_secs == 0 {
            return Err(invalid_value(
                "REQUEST_TIMEOUT_SECS",
                "must be greater than zero",
            ));
        }

        Ok(Self {
            http: HttpConfig {
                host: parse_env("HTTP_HOST", defaults::HTTP_HOST)?,
                port: parse_env("HTTP_PORT", &defaults::HTTP_PORT.to_string())?,
            },
            pipeline: PipelineConfig {
                default_trim_minutes,
            },
            limits: LimitsConfig {
                max_csv_bytes,
                request_timeout_secs,
            },
            cors: CorsConfig {
                allowed_origins: env_var_or(
                    "CORS_ALLOWED_ORIGINS",
                    defaults::CORS_ALLOWED_ORIGINS,
                ),
            },
        })
    }

    /// Socket address to bind
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }

    /// Get a human-readable configuration summary
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Metabolic Lab Server Configuration:\n\
             - Bind Address: {}\n\
             - Default Trim Minutes: {}\n\
             - Max CSV Bytes: {}\n\
             - Request Timeout: {}s\n\
             - CORS Origins: {}",
            self.socket_addr(),
            self.pipeline.default_trim_minutes,
            self.limits.max_csv_bytes,
            self.limits.request_timeout_secs,
            self.cors.allowed_origins,
        )
    }
}

/// Parse comma-separated CORS origins
#[must_use]
pub fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".into()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_env<T>(key: &'static str, default: &str) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = env_var_or(key, default);
    raw.trim()
        .parse()
        .map_err(|e| invalid_value(key, format!("'{raw}': {e}")))
}

fn invalid_value(key: &'static str, reason: impl Display) -> AppError {
    AppError::new(
        ErrorCode::ConfigInvalid,
        format!("Invalid {key} value: {reason}"),
    )
    .with_details(json!({ "variable": key }))
}

// ABOUTME: Configuration management module for the metabolic lab server
// ABOUTME: Environment-only configuration for network, pipeline defaults, limits and CORS
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment variable loading and validation
pub mod environment;

pub use environment::{CorsConfig, HttpConfig, LimitsConfig, PipelineConfig, ServerConfig};

// ABOUTME: Core types and constants for the metabolic assessment lab server
// ABOUTME: Foundation crate with error handling, client models, and physiological constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Metabolic Core
//!
//! Foundation crate providing shared types and constants for the metabolic
//! assessment platform. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and the
//!   gas-exchange pipeline taxonomy `MetabolicError`
//! - **constants**: Physiological coefficients and unit conversion factors
//! - **models**: Client anthropometrics consumed by predictive equations

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Physiological constants and unit conversion factors
pub mod constants;

/// Client data models (`Gender`, `ClientAnthropometrics`)
pub mod models;

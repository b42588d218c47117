// ABOUTME: Route module organization for the metabolic lab server HTTP endpoints
// ABOUTME: Groups health, metabolic and body composition routes with shared payload helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Each domain module holds route definitions and thin handlers that delegate
//! to `metabolic_intelligence`.

/// Body composition summary route
pub mod body_composition;
/// Health check and readiness routes
pub mod health;
/// CSV processing and RMR report routes
pub mod metabolic;
/// Request payload helpers shared by handlers
pub mod payload;

/// Body composition route handlers
pub use body_composition::BodyCompositionRoutes;
/// Health check route handlers
pub use health::HealthRoutes;
/// Metabolic assessment route handlers
pub use metabolic::{MetabolicRoutes, RmrReport, StepResponse};

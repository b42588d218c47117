// ABOUTME: Re-exports the unified error types from metabolic-core for server-side use
// ABOUTME: Route handlers return AppResult so every failure renders the same JSON envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use metabolic_core::errors::{
    AppError, AppResult, ErrorCode, ErrorResponse, ErrorResponseDetails, MetabolicError,
    PipelineResult,
};

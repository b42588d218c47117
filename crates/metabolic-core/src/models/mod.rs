// ABOUTME: Client data models shared by the calculator and the HTTP layer
// ABOUTME: Re-exports gender and anthropometric input types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Client anthropometrics and gender
pub mod client;

pub use client::{ClientAnthropometrics, Gender, ResolvedAnthropometrics};

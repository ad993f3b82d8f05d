// ABOUTME: Core types and constants for the Pierre nutrition planner
// ABOUTME: Foundation crate with error handling, nutrition domain models, and unit constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Core
//!
//! Foundation crate providing shared types and constants for the Pierre
//! nutrition planner. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and domain-specific errors
//! - **constants**: Energy and unit constants shared by the planning algorithms
//! - **models**: Body metrics, food items, macro totals, and goal enums

/// Unified error handling system with standard error codes
pub mod errors;

/// Energy conversion and unit constants
pub mod constants;

/// Core nutrition data models (`UserMetrics`, `FoodItem`, `MacroTotals`, etc.)
pub mod models;

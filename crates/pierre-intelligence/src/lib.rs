// ABOUTME: Nutrition planning algorithms extracted for parallel compilation
// ABOUTME: Metabolic calculator, target planner, and their validated configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Intelligence
//!
//! Pure, synchronous algorithms for the Pierre nutrition planner. Nothing in
//! this crate performs I/O; every function is deterministic given its inputs
//! and a [`NutritionPlanningConfig`].
//!
//! ## Modules
//!
//! - **config**: BMR coefficients, activity factors, macro split, energy bounds and the safe-rate table
//! - **`nutrition_calculator`**: BMR, TDEE and protein targets
//! - **`target_planner`**: Weekly rate selection, calorie bounding and macro split

/// Planning configuration with validation
pub mod config;

/// Metabolic calculator (BMR, TDEE, protein)
pub mod nutrition_calculator;

/// Calorie and macro target derivation
pub mod target_planner;

pub use config::{ConfigError, NutritionPlanningConfig};
pub use nutrition_calculator::{metabolic_profile, MetabolicProfile};
pub use target_planner::{TargetPlan, TargetPlanner, TargetWarning};

// ABOUTME: Core data models for the Pierre nutrition planner
// ABOUTME: Re-exports body metrics, goal enums, food items and macro totals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! ## Design Principles
//!
//! - **Oracle Agnostic**: Food items carry plain macro values regardless of which service produced them
//! - **Serializable**: All models support JSON serialization for storage and reports
//! - **Type Safe**: Goals, activity levels and diets are enums, parsed leniently from user text
//!
//! ## Core Models
//!
//! - `UserMetrics`: Immutable body-metrics snapshot owned by the caller
//! - `FoodItem`: One food with its macros, as produced by the macro oracle
//! - `MacroTotals`: Summable calorie/protein/carb/fat totals
//! - `NutritionTarget`: Daily targets derived once per planning run

mod nutrition;
mod profile;

pub use nutrition::{FoodItem, MacroProfile, MacroTotals, NutritionTarget};
pub use profile::{ActivityLevel, DietType, Gender, Goal, GoalIntensity, UserMetrics};

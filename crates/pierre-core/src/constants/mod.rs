// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Energy density and calendar constants shared by the planning algorithms
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.
//! Tunable planning values (rates, bounds, margins) live in configuration, not here.

/// Energy density of macronutrients and body mass
pub mod energy {
    /// Energy per gram of protein (Atwater factor)
    pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;

    /// Energy per gram of carbohydrate (Atwater factor)
    pub const KCAL_PER_GRAM_CARB: f64 = 4.0;

    /// Energy per gram of fat (Atwater factor)
    pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

    /// Energy stored in one kilogram of body mass change.
    ///
    /// Single authoritative value for converting weekly weight change into a
    /// daily calorie delta and back. Approximates adipose tissue (Wishnofsky 1958).
    pub const KCAL_PER_KG_BODY_MASS: f64 = 7700.0;
}

/// Calendar units used when scheduling multi-week plans
pub mod calendar {
    /// Days in a planning week
    pub const DAYS_PER_WEEK: u8 = 7;

    /// Days per week as a float for averaging
    pub const DAYS_PER_WEEK_F64: f64 = 7.0;

    /// Planning weeks per tenure month
    pub const WEEKS_PER_MONTH: u32 = 4;
}

/// Physiological validation limits for body metrics
pub mod limits {
    /// Maximum accepted body weight (kg)
    pub const MAX_WEIGHT_KG: f64 = 300.0;

    /// Maximum accepted height (cm)
    pub const MAX_HEIGHT_CM: f64 = 300.0;

    /// Maximum accepted age (years)
    pub const MAX_AGE_YEARS: u32 = 120;

    /// Maximum accepted tenure (months)
    pub const MAX_TENURE_MONTHS: u32 = 36;
}

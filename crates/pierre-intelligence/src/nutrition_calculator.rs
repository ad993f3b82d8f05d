// ABOUTME: Metabolic calculations using peer-reviewed formulas
// ABOUTME: BMR (Mifflin-St Jeor), TDEE from activity factors, and goal-based protein targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Metabolic Calculator
//!
//! Pure functions: identical inputs always yield identical outputs.
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>
//!
//! - Phillips, S.M., & Van Loon, L.J. (2011). Dietary protein for athletes.
//!   *Journal of Sports Sciences*, 29(sup1), S29-S38.
//!   <https://doi.org/10.1080/02640414.2011.619204>

use crate::config::{ActivityFactorsConfig, BmrConfig, NutritionPlanningConfig, ProteinConfig};
use pierre_core::constants::limits::{MAX_HEIGHT_CM, MAX_WEIGHT_KG};
use pierre_core::errors::{AppError, AppResult};
use pierre_core::models::{ActivityLevel, Gender, Goal, UserMetrics};
use serde::{Deserialize, Serialize};

/// Resting and total energy expenditure plus protein need at one body weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetabolicProfile {
    /// Basal Metabolic Rate (kcal/day)
    pub bmr: f64,
    /// Total Daily Energy Expenditure (kcal/day)
    pub tdee: f64,
    /// Daily protein target (grams)
    pub protein_target: f64,
}

fn validate_weight(weight_kg: f64) -> AppResult<()> {
    if weight_kg > 0.0 && weight_kg <= MAX_WEIGHT_KG {
        Ok(())
    } else {
        Err(AppError::out_of_range(
            "weight_kg",
            format!("Weight must be between 0 and {MAX_WEIGHT_KG} kg"),
        ))
    }
}

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation (1990)
///
/// Formula: BMR = (10 x `weight_kg`) + (6.25 x `height_cm`) - (5 x age) + `gender_offset`
/// - Men: +5
/// - Women: -161
///
/// # Reference
/// Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
///
/// # Errors
///
/// Returns a validation error if weight or height is not positive
pub fn calculate_mifflin_st_jeor(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    gender: Gender,
    config: &BmrConfig,
) -> AppResult<f64> {
    validate_weight(weight_kg)?;
    if !(height_cm > 0.0 && height_cm <= MAX_HEIGHT_CM) {
        return Err(AppError::out_of_range(
            "height_cm",
            format!("Height must be between 0 and {MAX_HEIGHT_CM} cm"),
        ));
    }

    let weight_component = config.msj_weight_coef * weight_kg;
    let height_component = config.msj_height_coef * height_cm;
    let age_component = config.msj_age_coef * f64::from(age);

    Ok(weight_component + height_component + age_component + config.gender_constant(gender))
}

/// Calculate Total Daily Energy Expenditure (TDEE)
///
/// Formula: TDEE = BMR x Activity Factor
///
/// - Sedentary: 1.2
/// - Light: 1.375
/// - Moderate: 1.55
/// - Active: 1.725
/// - Very active: 1.9
///
/// # Errors
///
/// Returns an error if BMR is not positive
pub fn calculate_tdee(
    bmr: f64,
    activity_level: ActivityLevel,
    config: &ActivityFactorsConfig,
) -> AppResult<f64> {
    if bmr <= 0.0 {
        return Err(AppError::invalid_input("BMR must be positive"));
    }
    Ok(bmr * config.factor(activity_level))
}

/// Daily protein target: body weight times the goal's g/kg factor
///
/// # Errors
///
/// Returns a validation error if weight is out of range
pub fn calculate_protein_target(
    weight_kg: f64,
    goal: Goal,
    config: &ProteinConfig,
) -> AppResult<f64> {
    validate_weight(weight_kg)?;
    Ok(weight_kg * config.g_per_kg(goal))
}

/// BMR, TDEE and protein for a profile evaluated at `weight_kg`
///
/// The weight is passed separately so projections can re-evaluate the
/// profile at a carried-forward weight.
///
/// # Errors
///
/// Returns a validation error if any input is out of range
pub fn metabolic_profile(
    metrics: &UserMetrics,
    weight_kg: f64,
    config: &NutritionPlanningConfig,
) -> AppResult<MetabolicProfile> {
    let bmr = calculate_mifflin_st_jeor(
        weight_kg,
        metrics.height_cm,
        metrics.age,
        metrics.gender,
        &config.bmr,
    )?;
    let tdee = calculate_tdee(bmr, metrics.activity_level, &config.activity_factors)?;
    let protein_target = calculate_protein_target(weight_kg, metrics.goal, &config.protein)?;

    Ok(MetabolicProfile {
        bmr,
        tdee,
        protein_target,
    })
}

// ABOUTME: Body metrics profile and goal enums used for nutrition planning
// ABOUTME: UserMetrics snapshot with fail-fast validation, plus Gender/ActivityLevel/Goal parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::limits::{MAX_AGE_YEARS, MAX_HEIGHT_CM, MAX_TENURE_MONTHS, MAX_WEIGHT_KG};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Normalize free text ("Very Active", "very-active") into `snake_case` keys
fn normalize_key(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// Gender for BMR calculations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male gender (+5 kcal BMR constant)
    Male,
    /// Female gender (-161 kcal BMR constant)
    Female,
}

impl FromStr for Gender {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            other => Err(AppError::invalid_input(format!(
                "Unknown gender '{other}'. Please use one of: male, female"
            ))
            .with_resource_id("gender")),
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Sedentary (little/no exercise)
    Sedentary,
    /// Lightly active (1-3 days/week)
    #[serde(alias = "lightly_active")]
    Light,
    /// Moderately active (3-5 days/week)
    #[serde(alias = "moderately_active")]
    Moderate,
    /// Active (6-7 days/week)
    Active,
    /// Very active (hard training or physical job)
    #[serde(alias = "very active", alias = "very-active")]
    VeryActive,
}

impl ActivityLevel {
    /// Stable key used in reports and configuration
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Active => "active",
            Self::VeryActive => "very_active",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "sedentary" => Ok(Self::Sedentary),
            "light" | "lightly_active" => Ok(Self::Light),
            "moderate" | "moderately_active" => Ok(Self::Moderate),
            "active" => Ok(Self::Active),
            "very_active" => Ok(Self::VeryActive),
            _ => Err(AppError::invalid_input(format!(
                "Unknown activity level '{s}'. Please use one of: sedentary, light, moderate, active, very_active"
            ))
            .with_resource_id("activity_level")),
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body composition goal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    /// Lose weight (caloric deficit)
    Cut,
    /// Gain weight (caloric surplus)
    Bulk,
    /// Hold weight (caloric balance)
    Maintain,
}

impl Goal {
    /// Sign of the weight change this goal implies (-1, +1 or 0)
    #[must_use]
    pub const fn direction(&self) -> f64 {
        match self {
            Self::Cut => -1.0,
            Self::Bulk => 1.0,
            Self::Maintain => 0.0,
        }
    }

    /// Stable key used in reports and prompts
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cut => "cut",
            Self::Bulk => "bulk",
            Self::Maintain => "maintain",
        }
    }
}

impl FromStr for Goal {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "cut" | "lose" | "weight_loss" => Ok(Self::Cut),
            "bulk" | "gain" | "muscle_gain" => Ok(Self::Bulk),
            "maintain" | "maintenance" => Ok(Self::Maintain),
            _ => Err(AppError::invalid_input(format!(
                "Unknown goal '{s}'. Please use one of: cut, bulk, maintain"
            ))
            .with_resource_id("goal")),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How hard the user wants to push toward the goal
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GoalIntensity {
    /// Slowest safe rate
    Gentle,
    /// Recommended rate
    #[default]
    Balanced,
    /// Fast rate, still under the safe maximum
    Aggressive,
}

impl FromStr for GoalIntensity {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "gentle" | "slow" => Ok(Self::Gentle),
            "balanced" | "moderate" => Ok(Self::Balanced),
            "aggressive" | "fast" => Ok(Self::Aggressive),
            _ => Err(AppError::invalid_input(format!(
                "Unknown goal intensity '{s}'. Please use one of: gentle, balanced, aggressive"
            ))
            .with_resource_id("goal_intensity")),
        }
    }
}

/// Dietary pattern passed to the candidate generator
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DietType {
    /// Vegetarian
    #[serde(rename = "veg", alias = "vegetarian")]
    Veg,
    /// Includes meat and fish
    #[default]
    #[serde(rename = "non-veg", alias = "non_veg", alias = "omnivore")]
    NonVeg,
}

impl DietType {
    /// Stable key used in prompts and reports
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Veg => "veg",
            Self::NonVeg => "non-veg",
        }
    }
}

impl FromStr for DietType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "veg" | "vegetarian" => Ok(Self::Veg),
            "non_veg" | "nonveg" | "omnivore" => Ok(Self::NonVeg),
            _ => Err(AppError::invalid_input(format!(
                "Unknown diet type '{s}'. Please use one of: veg, non-veg"
            ))
            .with_resource_id("diet_type")),
        }
    }
}

impl fmt::Display for DietType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const fn default_tenure_months() -> u32 {
    3
}

/// Immutable body-metrics snapshot for one planning run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMetrics {
    /// Current body weight (kg)
    pub weight_kg: f64,
    /// Height (cm)
    pub height_cm: f64,
    /// Age (years)
    pub age: u32,
    /// Gender for the BMR constant
    pub gender: Gender,
    /// Activity level for the TDEE multiplier
    pub activity_level: ActivityLevel,
    /// Body composition goal
    pub goal: Goal,
    /// Preferred pace toward the goal
    #[serde(default)]
    pub goal_intensity: GoalIntensity,
    /// Dietary pattern
    #[serde(default)]
    pub diet_type: DietType,
    /// Comma-separated foods to avoid
    #[serde(default)]
    pub dislikes: String,
    /// Target body weight (kg), if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_weight: Option<f64>,
    /// Planning horizon in months
    #[serde(default = "default_tenure_months")]
    pub tenure_months: u32,
}

impl UserMetrics {
    /// Fields a stored profile document must carry
    pub const REQUIRED_FIELDS: [&'static str; 6] = [
        "weight_kg",
        "height_cm",
        "age",
        "gender",
        "activity_level",
        "goal",
    ];

    /// Parse and validate a loosely-typed profile document
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first missing or invalid field
    pub fn from_value(value: Value) -> AppResult<Self> {
        let Some(object) = value.as_object() else {
            return Err(AppError::invalid_input("Profile must be a JSON object"));
        };
        for field in Self::REQUIRED_FIELDS {
            if matches!(object.get(field), None | Some(Value::Null)) {
                return Err(AppError::missing_field(field));
            }
        }

        let metrics: Self = serde_json::from_value(value)
            .map_err(|e| AppError::invalid_input(format!("Invalid profile: {e}")))?;
        metrics.validate()?;
        Ok(metrics)
    }

    /// Check every field is inside its physiological range
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the offending field
    pub fn validate(&self) -> AppResult<()> {
        if !(self.weight_kg > 0.0 && self.weight_kg <= MAX_WEIGHT_KG) {
            return Err(AppError::out_of_range(
                "weight_kg",
                format!("Weight must be between 0 and {MAX_WEIGHT_KG} kg"),
            ));
        }
        if !(self.height_cm > 0.0 && self.height_cm <= MAX_HEIGHT_CM) {
            return Err(AppError::out_of_range(
                "height_cm",
                format!("Height must be between 0 and {MAX_HEIGHT_CM} cm"),
            ));
        }
        if self.age > MAX_AGE_YEARS {
            return Err(AppError::out_of_range(
                "age",
                format!("Age must be between 0 and {MAX_AGE_YEARS} years"),
            ));
        }
        if let Some(target) = self.target_weight {
            if !(target > 0.0 && target <= MAX_WEIGHT_KG) {
                return Err(AppError::out_of_range(
                    "target_weight",
                    format!("Target weight must be between 0 and {MAX_WEIGHT_KG} kg"),
                ));
            }
        }
        if self.tenure_months == 0 || self.tenure_months > MAX_TENURE_MONTHS {
            return Err(AppError::out_of_range(
                "tenure_months",
                format!("Tenure must be between 1 and {MAX_TENURE_MONTHS} months"),
            ));
        }
        Ok(())
    }

    /// Signed weight change still needed to reach the target (kg)
    #[must_use]
    pub fn weight_change_needed(&self, from_weight_kg: f64) -> Option<f64> {
        self.target_weight.map(|target| target - from_weight_kg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use serde_json::json;

    #[test]
    fn test_activity_level_parsing_is_lenient() {
        assert_eq!(
            "Very Active".parse::<ActivityLevel>().unwrap(),
            ActivityLevel::VeryActive
        );
        assert_eq!(
            "moderately-active".parse::<ActivityLevel>().unwrap(),
            ActivityLevel::Moderate
        );
        let err = "couch".parse::<ActivityLevel>().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_profile_from_value_defaults() {
        let metrics = UserMetrics::from_value(json!({
            "weight_kg": 70.0,
            "height_cm": 175.0,
            "age": 30,
            "gender": "male",
            "activity_level": "very active",
            "goal": "cut",
            "diet_type": "non-veg",
            "target_weight": 65.0
        }))
        .unwrap();

        assert_eq!(metrics.activity_level, ActivityLevel::VeryActive);
        assert_eq!(metrics.goal_intensity, GoalIntensity::Balanced);
        assert_eq!(metrics.tenure_months, 3);
        assert_eq!(metrics.weight_change_needed(70.0), Some(-5.0));
    }

    #[test]
    fn test_profile_missing_field_fails_fast() {
        let err = UserMetrics::from_value(json!({
            "weight_kg": 70.0,
            "height_cm": 175.0,
            "gender": "male",
            "activity_level": "moderate",
            "goal": "cut"
        }))
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::MissingRequiredField);
        assert_eq!(err.context.resource_id.as_deref(), Some("age"));
    }

    #[test]
    fn test_profile_rejects_non_positive_weight() {
        let err = UserMetrics::from_value(json!({
            "weight_kg": 0.0,
            "height_cm": 175.0,
            "age": 30,
            "gender": "female",
            "activity_level": "light",
            "goal": "maintain"
        }))
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    }
}

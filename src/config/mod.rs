// ABOUTME: Runtime configuration for the planning pipeline with environment overrides
// ABOUTME: Aggregates nutrition math, composer, validator, variety and projection settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Planner Configuration
//!
//! Environment-only: defaults are compiled in and selected values can be
//! overridden through `PIERRE_*` variables. There is no file-based loading.

use pierre_core::constants::calendar::WEEKS_PER_MONTH;
use pierre_intelligence::config::{ConfigError, NutritionPlanningConfig};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static PLANNER_CONFIG: OnceLock<PlannerConfig> = OnceLock::new();

/// How each week's calorie target is chosen during a projection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetMode {
    /// Targets planned once from the starting weight and held for every week
    #[default]
    Fixed,
    /// Targets recomputed from the weeks remaining; maintenance near the goal
    Adaptive,
}

impl FromStr for TargetMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Ok(Self::Fixed),
            "adaptive" => Ok(Self::Adaptive),
            other => Err(ConfigError::Parse(format!(
                "Unknown target mode '{other}', expected fixed or adaptive"
            ))),
        }
    }
}

impl fmt::Display for TargetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed => f.write_str("fixed"),
            Self::Adaptive => f.write_str("adaptive"),
        }
    }
}

/// Meal composer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposerConfig {
    /// Allowed deviation from the calorie target (kcal): 50
    pub margin_kcal: f64,
    /// Minimum items before an early stop in variety mode: 5
    pub min_items: usize,
    /// Enforce `min_items` before stopping
    pub variety_mode: bool,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            margin_kcal: 50.0,
            min_items: 5,
            variety_mode: true,
        }
    }
}

impl ComposerConfig {
    /// Item floor in effect (zero when variety mode is off)
    #[must_use]
    pub const fn effective_min_items(&self) -> usize {
        if self.variety_mode {
            self.min_items
        } else {
            0
        }
    }
}

/// Day validator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Composition attempts per day: 3
    pub max_attempts: u32,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

/// Variety tracking settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarietyConfig {
    /// Most recent used foods echoed into the dislikes prompt: 60
    pub prompt_limit: usize,
}

impl Default for VarietyConfig {
    fn default() -> Self {
        Self { prompt_limit: 60 }
    }
}

/// Projection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Weeks per tenure month: 4
    pub weeks_per_month: u32,
    /// Fixed or adaptive weekly targets
    pub target_mode: TargetMode,
    /// Adaptive mode switches to maintenance within this distance of the target (kg): 2.0
    pub maintenance_window_kg: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            weeks_per_month: WEEKS_PER_MONTH,
            target_mode: TargetMode::Fixed,
            maintenance_window_kg: 2.0,
        }
    }
}

/// Complete planner configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Metabolic, macro, energy and rate policy settings
    pub nutrition: NutritionPlanningConfig,
    /// Meal composer settings
    pub composer: ComposerConfig,
    /// Day validator settings
    pub validator: ValidatorConfig,
    /// Variety tracking settings
    pub variety: VarietyConfig,
    /// Projection settings
    pub projection: ProjectionConfig,
}

impl PlannerConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        PLANNER_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load planner config: {e}, using defaults");
                Self::default()
            })
        })
    }

    /// Load configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` naming the first invalid value
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.nutrition.validate()?;

        if !(0.0..=1000.0).contains(&self.composer.margin_kcal) {
            return Err(ConfigError::ValueOutOfRange(
                "meal margin must be between 0 and 1000 kcal",
            ));
        }
        if self.composer.min_items > 20 {
            return Err(ConfigError::ValueOutOfRange(
                "minimum items per day must be at most 20",
            ));
        }
        if !(1..=10).contains(&self.validator.max_attempts) {
            return Err(ConfigError::ValueOutOfRange(
                "day attempts must be between 1 and 10",
            ));
        }
        if self.projection.weeks_per_month == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "weeks per month must be at least 1",
            ));
        }
        if self.projection.maintenance_window_kg < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "maintenance window must not be negative",
            ));
        }
        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        Self::apply_env_var("PIERRE_MEAL_MARGIN_KCAL", &mut self.composer.margin_kcal)?;
        Self::apply_env_var("PIERRE_MIN_DAY_ITEMS", &mut self.composer.min_items)?;
        Self::apply_env_var("PIERRE_MAX_DAY_ATTEMPTS", &mut self.validator.max_attempts)?;
        Self::apply_env_var("PIERRE_KCAL_PER_KG", &mut self.nutrition.energy.kcal_per_kg)?;
        Self::apply_env_var("PIERRE_VARIETY_PROMPT_LIMIT", &mut self.variety.prompt_limit)?;
        Self::apply_env_var("PIERRE_TARGET_MODE", &mut self.projection.target_mode)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = PlannerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.composer.effective_min_items(), 5);
        assert_eq!(config.validator.max_attempts, 3);
    }

    #[test]
    fn test_target_mode_parse() {
        assert_eq!(
            "Adaptive".parse::<TargetMode>().ok(),
            Some(TargetMode::Adaptive)
        );
        assert!("sometimes".parse::<TargetMode>().is_err());
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let mut config = PlannerConfig::default();
        config.validator.max_attempts = 0;
        assert!(config.validate().is_err());
    }
}

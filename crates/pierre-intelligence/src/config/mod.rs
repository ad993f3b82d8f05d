// ABOUTME: Configuration module for pierre-intelligence crate
// ABOUTME: Aggregates metabolic, macro, energy, and safe-rate configuration with validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition Planning Configuration
//!
//! Every tunable number the metabolic calculator and target planner use lives
//! here, with defaults matching the published formulas. Callers validate once
//! and pass the configuration by reference.

/// Configuration error types
pub mod error;
/// BMR, activity, protein, macro split and energy sections
pub mod nutrition;
/// Unified safe weekly rate table
pub mod rate_policy;

pub use error::ConfigError;
pub use nutrition::{
    ActivityFactorsConfig, BmrConfig, EnergyConfig, MacroShare, MacroSplitConfig, ProteinConfig,
};
pub use rate_policy::{GoalRates, RatePolicyConfig};

use serde::{Deserialize, Serialize};

/// Complete configuration for metabolic and target calculations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutritionPlanningConfig {
    /// Mifflin-St Jeor coefficients
    pub bmr: BmrConfig,
    /// Activity factor multipliers for TDEE
    pub activity_factors: ActivityFactorsConfig,
    /// Protein g/kg per goal
    pub protein: ProteinConfig,
    /// Fat/carb shares per goal
    pub macro_split: MacroSplitConfig,
    /// Safe weekly rate table
    pub rate_policy: RatePolicyConfig,
    /// Energy conversions and calorie bounds
    pub energy: EnergyConfig,
}

impl NutritionPlanningConfig {
    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` naming the first inconsistent section
    pub fn validate(&self) -> Result<(), ConfigError> {
        nutrition::validate_all(
            &self.activity_factors,
            &self.protein,
            &self.macro_split,
            &self.energy,
        )?;
        self.rate_policy.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(NutritionPlanningConfig::default().validate().is_ok());
    }

    #[test]
    fn test_unordered_rates_rejected() {
        let mut config = NutritionPlanningConfig::default();
        config.rate_policy.bulk.safe_max = 0.2;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InconsistentRates(_))
        ));
    }

    #[test]
    fn test_macro_shares_over_whole_rejected() {
        let mut config = NutritionPlanningConfig::default();
        config.macro_split.cut.carb = 0.9;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWeights(_))
        ));
    }
}
